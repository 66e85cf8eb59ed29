use serde::{Deserialize, Serialize};

/// A social-graph account as returned by the API.
///
/// Identity is the opaque `id`; handles can collide or change, so reciprocity
/// checks must never compare by `handle`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    #[serde(rename = "username")]
    pub handle: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(rename = "is_verified", default)]
    pub verified: bool,
}

/// One page of a following list.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FollowingPage {
    pub data: Vec<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl FollowingPage {
    /// Cursor for the next page, if the API advertised one.
    pub fn after_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.cursors.as_ref())
            .and_then(|c| c.after.as_deref())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Cursors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// What the reverse lookup concluded about a single followee.
///
/// Followees who do follow back are not reported at all; the report is
/// "non-reciprocal only".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The followee's following list did not contain the origin account.
    NotFollowingBack,
    /// The reverse lookup failed; the reason is kept for the report.
    LookupFailed(String),
}

/// One line of the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolloweeReport {
    pub account: Account,
    pub outcome: LookupOutcome,
}
