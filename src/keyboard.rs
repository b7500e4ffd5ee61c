use teloxide::types::{KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::auth::Role;

pub const ADD_TEST: &str = "➕ Add test";
pub const DELETE_TEST: &str = "🗑 Delete test";
pub const LIST_TESTS: &str = "📜 All tests";
pub const SOLVE_TEST: &str = "📝 Solve test";

/// Keyboard attached to a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Admin,
    User,
    Remove,
}

impl Keyboard {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Keyboard::Admin,
            Role::User => Keyboard::User,
        }
    }
}

pub(crate) fn admin_keyboard() -> KeyboardMarkup {
    let keyboard = vec![
        vec![KeyboardButton::new(ADD_TEST), KeyboardButton::new(DELETE_TEST)],
        vec![KeyboardButton::new(LIST_TESTS)],
    ];

    KeyboardMarkup::new(keyboard)
}

pub(crate) fn user_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(SOLVE_TEST)]])
}

pub(crate) fn markup(keyboard: Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Admin => ReplyMarkup::Keyboard(admin_keyboard()),
        Keyboard::User => ReplyMarkup::Keyboard(user_keyboard()),
        Keyboard::Remove => ReplyMarkup::kb_remove(),
    }
}
