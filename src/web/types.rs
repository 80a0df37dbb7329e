//! Most of the structs in `web` module and their implementations live here.
//! Includes the request/response bodies, the structs that need to be validated and their parsing implementations.

use derive_more::Deref;
use lazy_regex::regex_is_match;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable Subscription
/// A subscription request that can be Deserialized but can have invalid fields.
/// Both fields take any JSON value: an `email` that is missing or not a string is rejected
/// the same way as a malformed one, `weakArea` is forwarded untouched (or not at all when absent).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeserSubscription {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub weak_area: Option<Value>,
}

impl DeserSubscription {
    pub fn new(email: impl Into<String>, weak_area: impl Into<Value>) -> Self {
        Self {
            email: Some(Value::String(email.into())),
            weak_area: Some(weak_area.into()),
        }
    }
}

/// Validated Subscription
#[derive(Debug, Clone)]
pub struct ValidSubscription {
    pub email: ValidEmail,
    pub weak_area: Option<Value>,
}

impl TryFrom<DeserSubscription> for ValidSubscription {
    type Error = DataParsingError;

    fn try_from(deser_sub: DeserSubscription) -> Result<Self, Self::Error> {
        let Some(Value::String(email)) = deser_sub.email else {
            return Err(DataParsingError::EmailInvalid);
        };

        Ok(ValidSubscription {
            email: ValidEmail::parse(email)?,
            weak_area: deser_sub.weak_area,
        })
    }
}

/// Validated Subscriber Email
///
/// Only a loose syntactic check: `local@domain.tld` where no part is empty
/// or contains whitespace or another `@`.
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

/// The provider's id of a list member: lowercase hex MD5 digest of the lowercased email.
/// Not a security measure, it only has to be stable for the same address.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct MemberId(String);

impl MemberId {
    pub fn from_email(email: &ValidEmail) -> Self {
        let digest = Md5::digest(email.as_ref().to_lowercase().as_bytes());
        Self(hex::encode(digest))
    }
}

/// The body sent to the provider when upserting a list member.
#[derive(Debug, Serialize)]
pub struct MemberUpsert<'a> {
    pub email_address: &'a str,
    pub status: &'static str,
    pub merge_fields: MergeFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct MergeFields<'a> {
    #[serde(rename = "WEAK", skip_serializing_if = "Option::is_none")]
    pub weak_area: Option<&'a Value>,
}

impl<'a> MemberUpsert<'a> {
    pub const STATUS_SUBSCRIBED: &'static str = "subscribed";

    pub fn subscribed(subscription: &'a ValidSubscription) -> Self {
        MemberUpsert {
            email_address: subscription.email.as_ref(),
            status: Self::STATUS_SUBSCRIBED,
            merge_fields: MergeFields {
                weak_area: subscription.weak_area.as_ref(),
            },
        }
    }
}

/// The uniform body of every `/subscribe` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResult {
    pub fn success(message: impl Into<String>) -> Self {
        RelayResult {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        RelayResult {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email invalid")]
    EmailInvalid,
}
