//! Reading and writing bucket properties.

use crate::backend::Backend;
use crate::bucket::BucketRef;
use crate::error::ClientResult;
use crate::props::BucketProperties;
use crate::protocol::Protocol;
use crate::translate::{decode_props, encode_props};
use riakpb_protocol::{MessageCode, RpbGetBucketReq, RpbGetBucketResp, RpbSetBucketReq};
use tracing::debug;

/// Fetches and updates bucket properties over a [`Backend`].
///
/// Each call performs exactly one exchange on a freshly opened channel:
/// `GetBucketReq`/`GetBucketResp` for [`get`](Self::get) and
/// `SetBucketReq`/`SetBucketResp` for [`put`](Self::put). The operator keeps
/// no state between calls.
///
/// # Example
///
/// ```
/// use riakpb_client::{BucketProperties, BucketPropertiesOperator, MockBackend, PropValue};
/// use riakpb_protocol::{MessageCode, RpbSetBucketReq};
///
/// let backend = MockBackend::new();
/// backend.push_ack(MessageCode::SetBucketResp);
///
/// let operator = BucketPropertiesOperator::new(backend.clone());
/// let props = BucketProperties::new()
///     .with("w", PropValue::symbol("quorum"))
///     .with("n_val", 3);
/// operator.put("users", &props).unwrap();
///
/// let sent: RpbSetBucketReq = backend.written_message(0).unwrap();
/// assert_eq!(sent.props.w, Some(u32::MAX - 2));
/// ```
#[derive(Debug, Clone)]
pub struct BucketPropertiesOperator<B> {
    backend: B,
}

impl<B: Backend> BucketPropertiesOperator<B> {
    /// Creates an operator. Performs no I/O.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetches the properties of `bucket`.
    ///
    /// # Errors
    ///
    /// Fails if the channel fails, the store answers with an error or an
    /// unexpected message, or the response cannot be decoded.
    pub fn get<R>(&self, bucket: &R) -> ClientResult<BucketProperties>
    where
        R: BucketRef + ?Sized,
    {
        let request = RpbGetBucketReq::new(bucket.name(), bucket.wire_type());
        debug!(
            bucket = bucket.name(),
            bucket_type = bucket.type_name().filter(|_| bucket.needs_type()),
            "getting bucket properties"
        );

        let response: RpbGetBucketResp = self.backend.protocol(|p| {
            p.write(MessageCode::GetBucketReq, &request)?;
            p.expect(MessageCode::GetBucketResp)
        })?;

        decode_props(&response.props)
    }

    /// Sets the given properties of `bucket`, leaving the others untouched.
    ///
    /// An empty mapping is sent as an update with no fields set.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::Translation`](crate::ClientError::Translation)
    /// before any channel is opened if a property cannot be encoded; otherwise
    /// fails as [`get`](Self::get) does.
    pub fn put<R>(&self, bucket: &R, props: &BucketProperties) -> ClientResult<()>
    where
        R: BucketRef + ?Sized,
    {
        let wire = encode_props(props)?;
        let request = RpbSetBucketReq::new(bucket.name(), bucket.wire_type(), wire);
        debug!(
            bucket = bucket.name(),
            bucket_type = bucket.type_name().filter(|_| bucket.needs_type()),
            properties = props.len(),
            "setting bucket properties"
        );

        self.backend.protocol(|p| {
            p.write(MessageCode::SetBucketReq, &request)?;
            p.expect_ack(MessageCode::SetBucketResp)
        })
    }
}
