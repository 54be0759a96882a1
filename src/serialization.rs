//! Byte encoding of fitted transformer parameters.
//!
//! Parameters are written inside a small envelope carrying the transformer
//! kind and an encoding version, so bytes produced by one transformer cannot
//! be decoded as another's parameters.

use crate::preprocessing::PreprocessingError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Version of the envelope layout written by [`SerializableParams::to_bytes`].
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, P> {
    kind: &'a str,
    format: u32,
    params: &'a P,
}

#[derive(Deserialize)]
struct Envelope<P> {
    kind: String,
    format: u32,
    params: P,
}

/// Fitted parameters that can be stored as bytes and read back.
pub trait SerializableParams: Serialize + DeserializeOwned {
    /// Tag identifying the transformer these parameters belong to.
    const KIND: &'static str;

    /// Encode the parameters with `bincode`.
    fn to_bytes(&self) -> Result<Vec<u8>, PreprocessingError> {
        let envelope = EnvelopeRef {
            kind: Self::KIND,
            format: FORMAT_VERSION,
            params: self,
        };
        Ok(bincode::serialize(&envelope)?)
    }

    /// Decode parameters written by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    /// [`PreprocessingError::Serialization`] for malformed bytes, another
    /// transformer's parameters, or an unknown format version.
    fn from_bytes(bytes: &[u8]) -> Result<Self, PreprocessingError> {
        let envelope: Envelope<Self> = bincode::deserialize(bytes)?;
        if envelope.kind != Self::KIND {
            return Err(PreprocessingError::Serialization(format!(
                "expected {} parameters, found {}",
                Self::KIND,
                envelope.kind
            )));
        }
        if envelope.format != FORMAT_VERSION {
            return Err(PreprocessingError::Serialization(format!(
                "unsupported parameter format {} (expected {FORMAT_VERSION})",
                envelope.format
            )));
        }
        Ok(envelope.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Keep {
        columns: Vec<String>,
    }

    impl SerializableParams for Keep {
        const KIND: &'static str = "keep";
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Remove {
        columns: Vec<String>,
    }

    impl SerializableParams for Remove {
        const KIND: &'static str = "remove";
    }

    #[test]
    fn test_bytes_round_trip() {
        let params = Keep {
            columns: vec!["a".to_string(), "b".to_string()],
        };
        let bytes = params.to_bytes().unwrap();
        assert_eq!(Keep::from_bytes(&bytes).unwrap(), params);
    }

    #[test]
    fn test_kind_mismatch() {
        let bytes = Keep { columns: vec![] }.to_bytes().unwrap();
        let err = Remove::from_bytes(&bytes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Serialization error: expected remove parameters, found keep"
        );
    }

    #[test]
    fn test_unknown_format() {
        let envelope = EnvelopeRef {
            kind: "keep",
            format: FORMAT_VERSION + 1,
            params: &Keep { columns: vec![] },
        };
        let bytes = bincode::serialize(&envelope).unwrap();
        assert!(matches!(
            Keep::from_bytes(&bytes),
            Err(PreprocessingError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_garbage_bytes() {
        assert!(Keep::from_bytes(&[0xff]).is_err());
    }
}
