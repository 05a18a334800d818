//! Request handlers.

mod http;
mod messages;
mod websocket;

pub use http::{
    create_group, delete_group, delete_me, edit_me, get_group_detail, get_groups, get_me,
    get_user_profile, health_check, join_group, leave_group, sign_up,
};
pub use messages::{get_messages, post_message};
pub use websocket::websocket_handler;
