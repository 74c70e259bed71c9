// Record identifiers are plain v4 UUIDs.

pub fn generate_id() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}
