use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of an authenticated user.
///
/// Issued by the auth service and shared by the session and the `profiles` row.
/// The backend compares ids as lowercase UUID strings; filters go through
/// [`UserId::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl_id!(UserId);

impl UserId {
    /// Lowercase form used in backend filters.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_lowercases_uuid() {
        let id = UserId::from("6F9619FF-8B86-D011-B42D-00CF4FC964FF");
        assert_eq!(id.normalized(), "6f9619ff-8b86-d011-b42d-00cf4fc964ff");
    }

    #[test]
    fn display_keeps_original_value() {
        let id: UserId = "U1".into();
        assert_eq!(id.to_string(), "U1");
        assert_eq!(id.as_str(), "U1");
    }
}
