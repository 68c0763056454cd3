/// Creates a new b-tree map of key-value pairs
#[cfg(test)]
macro_rules! map {
	($($k:expr => $v:expr),* $(,)?) => {{
		let mut m = ::std::collections::BTreeMap::new();
		$(m.insert($k, $v);)*
		m
	}};
}

/// Implements the ordered key codec for a key layout struct.
///
/// The struct must derive `Serialize` and `Deserialize`, and
/// carry a single lifetime for any borrowed key segments.
macro_rules! impl_key {
	($name:ident) => {
		impl $crate::key::KeyEncode for $name<'_> {
			fn encode(&self) -> Result<Vec<u8>, $crate::err::Error> {
				Ok(storekey::serialize(self)?)
			}
		}
		impl<'a> $crate::key::KeyDecode<'a> for $name<'a> {
			fn decode(bytes: &'a [u8]) -> Result<Self, $crate::err::Error> {
				Ok(storekey::deserialize(bytes)?)
			}
		}
	};
}

/// A macro that allows lazily parsing a value from the environment variable,
/// with a fallback default value if the variable is not set or parsing fails.
///
/// # Parameters
///
/// - `$key`: An expression representing the name of the environment variable.
/// - `$t`: The type of the value to be parsed.
/// - `$default`: The default value to fall back to if the environment variable
///   is not set or parsing fails.
#[macro_export]
macro_rules! lazy_env_parse {
	($key:expr, $t:ty, $default:expr) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or($default)
		})
	};
}

#[cfg(test)]
mod test {
	use std::sync::LazyLock;

	#[test]
	fn lazy_env_parse_falls_back_to_default() {
		static VALUE: LazyLock<u32> = lazy_env_parse!("TESSERA_TEST_UNSET_VARIABLE", u32, 42);
		assert_eq!(*VALUE, 42);
	}

	#[test]
	fn map_builds_ordered_entries() {
		let m = map! { "b" => 2, "a" => 1 };
		assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
	}
}
