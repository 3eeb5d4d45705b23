//! Contract ABI endpoint

use serde_json::Value;

use crate::envelope::Envelope;
use crate::ScanError;

/// Parse a `contract/getabi` response into the raw ABI JSON text
///
/// The ABI arrives as a JSON document serialized into a string. It is handed
/// back as text; decoding it is up to the caller.
pub fn parse_contract_abi(body: &[u8]) -> Result<String, ScanError> {
    match Envelope::open_required(body, "contract ABI")? {
        Value::String(abi) => Ok(abi),
        other => Ok(serde_json::to_string(&other)?),
    }
}
