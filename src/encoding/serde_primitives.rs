use serde::{self, Deserialize, Deserializer, Serializer};

fn serialize_hex<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(value)))
}

fn deserialize_hex<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let digits = s.strip_prefix("0x").unwrap_or(&s);
    hex::decode(digits).map_err(serde::de::Error::custom)
}

/// `0x` prefixed hex strings for byte vectors. An empty vector is `"0x"`.
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_hex(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_hex(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Payload {
        #[serde(with = "hex_bytes")]
        data: Vec<u8>,
    }

    #[test]
    fn test_hex_bytes() {
        let payload: Payload = serde_json::from_str(r#"{"data": "0xABcd"}"#).unwrap();
        assert_eq!(payload.data, vec![0xab, 0xcd]);
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"data":"0xabcd"}"#);

        let empty: Payload = serde_json::from_str(r#"{"data": "0x"}"#).unwrap();
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_hex_bytes_rejects_invalid_hex() {
        assert!(serde_json::from_str::<Payload>(r#"{"data": "0xzz"}"#).is_err());
    }
}
