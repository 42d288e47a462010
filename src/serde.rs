use std::fmt;

use serde::{
    de::{self, Deserializer, Visitor},
    Deserialize, Serialize, Serializer,
};

use crate::{FastId, MAX_TEXT_LEN};

impl Serialize for FastId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buffer = [0; MAX_TEXT_LEN];
        serializer.serialize_str(self.text(&mut buffer))
    }
}

impl<'de> Deserialize<'de> for FastId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FastIdVisitor;

        impl<'de> Visitor<'de> for FastIdVisitor {
            type Value = FastId;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a FastId string or a 64-bit integer")
            }
            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(de::Error::custom)
            }
            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(FastId::from_i64(value))
            }
            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                i64::try_from(value)
                    .map(FastId::from_i64)
                    .map_err(|_| de::Error::invalid_value(de::Unexpected::Unsigned(value), &self))
            }
        }

        // Only self-describing formats can carry the integer form.
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(FastIdVisitor)
        } else {
            deserializer.deserialize_str(FastIdVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::Error;

    #[test]
    fn test_serialize() {
        let id = FastId::from_i64(123);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""81040G0081""#);
        assert_eq!(serde_json::to_string(&FastId::EMPTY).unwrap(), r#""0""#);

        let parsed: FastId = "81o4og0o81".parse().unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""81o4og0o81""#);
    }

    #[test]
    fn test_deserialize() {
        let id: FastId = serde_json::from_str(r#""81040G0081""#).unwrap();
        assert_eq!(id.to_i64(), 123);

        let id: FastId = serde_json::from_str(r#""123""#).unwrap();
        assert_eq!(id.to_i64(), 123);

        let id: FastId = serde_json::from_str("-7").unwrap();
        assert_eq!(id.to_i64(), -7);

        assert!(serde_json::from_str::<FastId>(r#""*""#).is_err());
        assert!(serde_json::from_str::<FastId>(r#""""#).is_err());
        assert!(serde_json::from_str::<FastId>("18446744073709551615").is_err());
        assert!(serde_json::from_str::<FastId>("1.5").is_err());
    }

    #[test]
    fn test_deserialize_error_message() {
        let err = serde_json::from_str::<FastId>(r#""ABU""#).unwrap_err();
        assert!(err.to_string().contains(&Error::InvalidChar.to_string()));
    }

    #[test]
    fn test_binary_roundtrip() {
        let id = FastId::from_i64(123);
        let bytes = postcard::to_allocvec(&id).unwrap();
        let back: FastId = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "81040G0081");

        let parsed: FastId = "81o4og0o81".parse().unwrap();
        let bytes = postcard::to_allocvec(&parsed).unwrap();
        let back: FastId = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, parsed);
        assert_eq!(back.to_string(), "81o4og0o81");
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(FastId::from_i64(123), 1);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"81040G0081":1}"#);

        let back: BTreeMap<FastId, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
