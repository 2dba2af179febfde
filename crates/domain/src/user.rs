use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    /// Address renewal reminders are sent to
    pub email: String,
    /// IANA timezone new reminders of this `User` are created in
    pub timezone: Option<String>,
}

impl User {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
            timezone: None,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
