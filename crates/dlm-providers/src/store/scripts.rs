//! Lua scripts executed atomically by Redis
//!
//! Every script takes the lock key as `KEYS[1]` and the token as `ARGV[1]`;
//! lease-setting scripts take the TTL in milliseconds as `ARGV[2]`. All of
//! them reply with an integer, 1 on success and 0 otherwise.

/// Extend the lease if the key holds the token, else set it if absent
pub const ACQUIRE_OR_REFRESH: &str = r"
if redis.call('get', KEYS[1]) == ARGV[1] then
    return redis.call('pexpire', KEYS[1], ARGV[2])
elseif redis.call('set', KEYS[1], ARGV[1], 'NX', 'PX', ARGV[2]) then
    return 1
else
    return 0
end
";

/// Delete the key only if it holds the token
pub const COMPARE_AND_DELETE: &str = r"
if redis.call('get', KEYS[1]) == ARGV[1] then
    return redis.call('del', KEYS[1])
else
    return 0
end
";

/// Reset the lease only if the key holds the token
pub const COMPARE_AND_EXTEND: &str = r"
if redis.call('get', KEYS[1]) == ARGV[1] then
    return redis.call('pexpire', KEYS[1], ARGV[2])
else
    return 0
end
";
