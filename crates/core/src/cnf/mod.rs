use std::sync::LazyLock;

/// The characters which are supported in generated record IDs.
pub const ID_CHARS: [char; 36] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// The length of generated record IDs. With 36 characters
/// this gives a little over 128 bits of randomness.
pub const ID_LENGTH: usize = 25;

/// The engine instance name used when none is configured.
pub const DEFAULT_KV_NAME: &str = "tessera";

/// Specifies the names of parameters which can not be specified in a query.
pub const PROTECTED_PARAM_NAMES: &[&str] =
	&["parent", "parents", "this", "event", "value", "before", "after", "session"];

/// Specifies how many document pipelines can be in flight for a single statement.
pub static MAX_CONCURRENT_TASKS: LazyLock<usize> =
	lazy_env_parse!("TESSERA_MAX_CONCURRENT_TASKS", usize, 64);

/// Specifies how deep computation recursive call will go before en error is returned.
pub static MAX_COMPUTATION_DEPTH: LazyLock<u32> =
	lazy_env_parse!("TESSERA_MAX_COMPUTATION_DEPTH", u32, 120);

/// The maximum number of keys that should be scanned at once in general queries.
pub static NORMAL_FETCH_SIZE: LazyLock<u32> =
	lazy_env_parse!("TESSERA_NORMAL_FETCH_SIZE", u32, 50);

/// How long a document pipeline waits for a record lock before giving up.
pub static LOCK_TIMEOUT_MILLIS: LazyLock<u64> =
	lazy_env_parse!("TESSERA_LOCK_TIMEOUT_MILLIS", u64, 5_000);

/// The largest number of records a single model generator may produce.
pub static MAX_MODEL_COUNT: LazyLock<u64> =
	lazy_env_parse!("TESSERA_MAX_MODEL_COUNT", u64, 1_000_000);
