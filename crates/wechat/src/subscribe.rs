use serde::Serialize;

/// Booking audit outcome as rendered by the message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Approved,
    Rejected,
}

impl AuditStatus {
    /// Only the exact values `confirmed` and `approved` count as approved;
    /// every other status, known or not, renders as rejected.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "confirmed" | "approved" => AuditStatus::Approved,
            _ => AuditStatus::Rejected,
        }
    }

    pub fn is_approved(self) -> bool {
        matches!(self, AuditStatus::Approved)
    }
}

/// Per-request notification input, built from the HTTP body and the
/// trusted openid header. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct AuditNotification {
    pub openid: Option<String>,
    pub status: String,
    pub room_number: Option<String>,
    pub booking_id: Option<String>,
    pub reject_reason: Option<String>,
}

/// Wire shape of the `subscribe/send` endpoint. The `data` field names
/// must match the template configured in the WeChat console.
#[derive(Debug, Serialize)]
pub struct SubscribeMessage {
    pub touser: String,
    pub template_id: String,
    pub page: String,
    pub data: AuditResultData,
}

#[derive(Debug, Serialize)]
pub struct AuditResultData {
    pub thing1: FieldValue,
    pub thing2: FieldValue,
    pub thing3: FieldValue,
    pub thing4: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct FieldValue {
    pub value: String,
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl SubscribeMessage {
    /// Composes the audit-result message, substituting generic fallbacks
    /// for absent or blank room/booking/reason fields.
    pub fn audit_result(
        openid: &str,
        template_id: &str,
        notification: &AuditNotification,
    ) -> Self {
        let status = AuditStatus::classify(&notification.status);

        let result: FieldValue = if status.is_approved() {
            "预约审核通过".into()
        } else {
            "预约审核未通过".into()
        };
        let room: FieldValue = match present(&notification.room_number) {
            Some(room) => format!("房间 {room}").into(),
            None => "预约房间".into(),
        };
        let booking: FieldValue = present(&notification.booking_id)
            .unwrap_or("预约记录")
            .into();
        let remark: FieldValue = if status.is_approved() {
            "请按时前往琴房签到使用".into()
        } else {
            present(&notification.reject_reason)
                .unwrap_or("审核未通过，请联系管理员了解详情")
                .into()
        };

        Self {
            touser: openid.to_string(),
            template_id: template_id.to_string(),
            page: "pages/index/index".to_string(),
            data: AuditResultData {
                thing1: result,
                thing2: room,
                thing3: booking,
                thing4: remark,
            },
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
