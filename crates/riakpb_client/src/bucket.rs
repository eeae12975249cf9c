//! Bucket references.

/// A bucket type; buckets of the `default` type are addressed by name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketType {
    name: String,
}

impl BucketType {
    /// Name of the implicit bucket type.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Creates a bucket type.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for the implicit `default` type.
    pub fn is_default(&self) -> bool {
        self.name == Self::DEFAULT_NAME
    }
}

impl Default for BucketType {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

/// A bucket, optionally qualified by a bucket type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    name: String,
    bucket_type: BucketType,
}

impl Bucket {
    /// Creates a bucket of the default type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bucket_type: BucketType::default(),
        }
    }

    /// Creates a bucket of the given type.
    pub fn typed(bucket_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bucket_type: BucketType::new(bucket_type),
        }
    }

    /// Returns the bucket type.
    pub fn bucket_type(&self) -> &BucketType {
        &self.bucket_type
    }
}

/// Anything that names a bucket in a request.
///
/// Requests carry the type qualifier only when [`needs_type`](Self::needs_type)
/// is true.
pub trait BucketRef {
    /// Returns the bucket name.
    fn name(&self) -> &str;

    /// Returns true if requests must carry the bucket type.
    fn needs_type(&self) -> bool;

    /// Returns the bucket type name, when one is needed.
    fn type_name(&self) -> Option<&str>;

    /// Returns the type qualifier as it goes on the wire.
    fn wire_type(&self) -> Option<Vec<u8>> {
        if self.needs_type() {
            self.type_name().map(|t| t.as_bytes().to_vec())
        } else {
            None
        }
    }
}

impl BucketRef for Bucket {
    fn name(&self) -> &str {
        &self.name
    }

    fn needs_type(&self) -> bool {
        !self.bucket_type.is_default()
    }

    fn type_name(&self) -> Option<&str> {
        Some(self.bucket_type.name())
    }
}

impl BucketRef for str {
    fn name(&self) -> &str {
        self
    }

    fn needs_type(&self) -> bool {
        false
    }

    fn type_name(&self) -> Option<&str> {
        None
    }
}

impl BucketRef for String {
    fn name(&self) -> &str {
        self
    }

    fn needs_type(&self) -> bool {
        false
    }

    fn type_name(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_type_is_not_sent() {
        let bucket = Bucket::new("users");
        assert!(bucket.bucket_type().is_default());
        assert!(!bucket.needs_type());
        assert_eq!(bucket.wire_type(), None);
    }

    #[test]
    fn explicit_default_type_is_not_sent() {
        let bucket = Bucket::typed("default", "users");
        assert!(!bucket.needs_type());
        assert_eq!(bucket.wire_type(), None);
    }

    #[test]
    fn custom_type_is_sent() {
        let bucket = Bucket::typed("maps", "carts");
        assert!(bucket.needs_type());
        assert_eq!(bucket.name(), "carts");
        assert_eq!(bucket.wire_type(), Some(b"maps".to_vec()));
    }

    #[test]
    fn plain_names() {
        assert_eq!(BucketRef::name("users"), "users");
        assert!(!"users".needs_type());
        assert_eq!(String::from("users").wire_type(), None);
    }
}
