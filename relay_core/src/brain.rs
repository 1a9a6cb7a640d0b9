use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use crate::user::User;

/// A store of user records, keyed by id.
pub trait Brain
where
    Self: Send + Sync,
{
    /// Looks up a user by id, creating it if it has never been seen.
    fn user_for_id(&self, id: &str) -> User;

    /// Finds a user by name, ignoring case.
    fn user_for_name(&self, name: &str) -> Option<User>;

    /// Stores the user, replacing any record with the same id.
    fn save_user(&self, user: User);
}

#[derive(Default, Debug)]
pub struct MemoryBrain {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryBrain {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Brain for MemoryBrain {
    fn user_for_id(&self, id: &str) -> User {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        users
            .entry(id.to_string())
            .or_insert_with(|| {
                log::trace!("creating user: {id}");
                User::new(id)
            })
            .clone()
    }

    fn user_for_name(&self, name: &str) -> Option<User> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        users
            .values()
            .find(|user| user.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn save_user(&self, user: User) {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id.clone(), user);
    }
}
