//! Command line interface
//!
//! Each invocation builds a fresh lock service from configuration, so
//! `release` and `extend` take the token printed by `acquire`. With the
//! default in-memory store, locks live only as long as the process; use
//! `hold` or configure a Redis store for anything else.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dlm_application::LockService;
use dlm_application::ports::registry::list_lock_stores;
use dlm_domain::entities::LockHandle;
use dlm_domain::value_objects::{AcquireOnceParams, LockFailure, RenewParams};
use dlm_infrastructure::bootstrap::build_lock_service;
use dlm_infrastructure::config::{ConfigLoader, LockConfig};
use dlm_infrastructure::logging::init_logging;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Command line interface for the lock manager
#[derive(Parser, Debug)]
#[command(name = "dlm")]
#[command(about = "Distributed lock manager")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Lock operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Acquire a lock and print its token
    Acquire {
        /// Lock name
        name: String,
        /// Lease length (defaults to `lock.default_expire_ms`)
        #[arg(long)]
        expire_ms: Option<u64>,
        /// Retry with the configured policy instead of failing fast
        #[arg(long)]
        wait: bool,
        /// Use this token instead of generating one
        #[arg(long)]
        token: Option<String>,
    },
    /// Release a lock held with `token`
    Release {
        /// Lock name
        name: String,
        /// Token printed by `acquire`
        token: String,
    },
    /// Reset the lease of a lock held with `token`
    Extend {
        /// Lock name
        name: String,
        /// Token printed by `acquire`
        token: String,
        /// New lease length (defaults to `lock.default_expire_ms`)
        #[arg(long)]
        expire_ms: Option<u64>,
    },
    /// Acquire a lock and keep renewing it until Ctrl-C, then release it
    Hold {
        /// Lock name
        name: String,
        /// Lease length (defaults to `lock.default_expire_ms`)
        #[arg(long)]
        expire_ms: Option<u64>,
        /// Renewal interval (defaults to `lock.renew_interval_ms`)
        #[arg(long)]
        renew_ms: Option<u64>,
    },
    /// List registered store providers
    Providers,
}

/// Load configuration, install logging and run one command
pub async fn run(cli: Cli) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let service = build_lock_service(&config).context("Failed to build lock service")?;
    let shutdown = async {
        // A failed signal listener ends the hold like Ctrl-C would
        let _ = tokio::signal::ctrl_c().await;
    };

    let output = execute(&service, &config.lock, cli.command, shutdown).await?;
    println!("{output}");
    Ok(())
}

/// Run `command` against `service`
///
/// `shutdown` ends a `hold`; other commands ignore it. Returns the text to
/// print on success.
pub async fn execute<F>(
    service: &LockService,
    lock: &LockConfig,
    command: Command,
    shutdown: F,
) -> Result<String>
where
    F: Future<Output = ()>,
{
    let expire_or_default =
        |expire_ms: Option<u64>| expire_ms.map_or_else(|| lock.expire(), Duration::from_millis);

    match command {
        Command::Acquire {
            name,
            expire_ms,
            wait,
            token,
        } => {
            let expire = expire_or_default(expire_ms);
            let acquisition = if wait {
                let mut params = lock.acquire_params(&name).with_expire(expire);
                if let Some(token) = token {
                    params = params.with_token(token);
                }
                service.lock(params).await
            } else {
                let mut params = AcquireOnceParams::new(&name, expire);
                if let Some(token) = token {
                    params = params.with_token(token);
                }
                service.lock_once(params).await
            };
            let handle = acquisition
                .into_result()
                .with_context(|| format!("Failed to acquire '{name}'"))?;
            Ok(handle.token().to_string())
        }
        Command::Release { name, token } => {
            let handle = LockHandle::new(service.lock_key(&name), token);
            service
                .unlock(&handle)
                .await
                .with_context(|| format!("Failed to release '{name}'"))?;
            Ok(format!("released {}", handle.key()))
        }
        Command::Extend {
            name,
            token,
            expire_ms,
        } => {
            let expire = expire_or_default(expire_ms);
            let handle = LockHandle::new(service.lock_key(&name), token);
            service
                .extend(&handle, expire)
                .await
                .with_context(|| format!("Failed to extend '{name}'"))?;
            Ok(format!(
                "extended {} by {}ms",
                handle.key(),
                expire.as_millis()
            ))
        }
        Command::Hold {
            name,
            expire_ms,
            renew_ms,
        } => {
            let renew = RenewParams::new(
                expire_or_default(expire_ms),
                renew_ms.map_or_else(|| lock.renew_params().interval, Duration::from_millis),
            );
            hold(service, lock, &name, renew, shutdown).await
        }
        Command::Providers => Ok(list_lock_stores()
            .into_iter()
            .map(|(name, description)| format!("{name}\t{description}"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

async fn hold<F>(
    service: &LockService,
    lock: &LockConfig,
    name: &str,
    renew: RenewParams,
    shutdown: F,
) -> Result<String>
where
    F: Future<Output = ()>,
{
    if renew.interval >= renew.expire {
        bail!(
            "Renew interval ({}ms) must be shorter than the lease ({}ms)",
            renew.interval.as_millis(),
            renew.expire.as_millis()
        );
    }

    let handle = service
        .lock(lock.acquire_params(name).with_expire(renew.expire))
        .await
        .into_result()
        .with_context(|| format!("Failed to acquire '{name}'"))?;
    println!("holding {} with token {}", handle.key(), handle.token());

    let renewal = service.spawn_auto_renew(handle.clone(), renew);
    let cancel = renewal.cancellation_token();
    let join = renewal.join();
    tokio::pin!(join);

    let finished = tokio::select! {
        () = shutdown => {
            cancel.cancel();
            None
        }
        outcome = &mut join => Some(outcome),
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => join.await,
    };

    match outcome {
        Ok(()) | Err(LockFailure::Cancelled) => {
            service
                .unlock(&handle)
                .await
                .with_context(|| format!("Failed to release '{name}'"))?;
            Ok(format!("released {}", handle.key()))
        }
        Err(failure) => {
            // Best effort; the lease may already belong to someone else
            let _ = service.unlock(&handle).await;
            bail!("Lost lock '{}': {}", name, failure)
        }
    }
}
