mod identifier;
mod number;

pub use identifier::is_valid_identifier;
pub(crate) use identifier::sanitize_identifier;
pub use number::Number;
pub(crate) use number::write_float;
pub(crate) use number::write_int;

pub(crate) type HashMap<K, V> = fnv::FnvHashMap<K, V>;
pub(crate) type HashSet<K> = fnv::FnvHashSet<K>;
