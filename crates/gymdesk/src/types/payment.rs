use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Amount, Id};
use super::member::Member;
use super::membership::Membership;

/// A recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Primary key
    pub id: Id,
    /// Paying member
    pub member_id: Id,
    /// Membership paid for, if any
    #[serde(default)]
    pub membership_id: Option<Id>,
    /// Amount paid
    pub amount: Amount,
    /// Payment date
    pub date: String,
    /// Payment method, e.g. "cash" or "card"
    pub method: String,
    /// Payment status, e.g. "completed"
    pub status: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Paying member, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Box<Member>>,
    /// Membership, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<Box<Membership>>,
}

/// Printable receipt from `GET /payments/{id}/receipt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Receipt identifier
    pub receipt_number: String,
    /// Payment date
    pub date: String,
    /// Member display name
    pub member_name: String,
    /// Amount paid
    pub amount: Amount,
    /// Payment method
    pub method: String,
    /// Payment status
    pub status: String,
    /// Plan name of the membership paid for
    pub membership_type: String,
}

/// Payload for `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePayment {
    /// Paying member
    pub member_id: Id,
    /// Membership paid for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<Id>,
    /// Amount paid
    pub amount: f64,
    /// Payment method
    pub method: String,
    /// Initial status; the server defaults it when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
