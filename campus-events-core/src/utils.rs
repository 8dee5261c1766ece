use uuid::Uuid;

/// Fresh identifier for users and events.
///
/// UUIDv7 leads with a millisecond timestamp, so ids still sort by creation time.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}
