pub mod use_auth;
pub mod use_form;
pub mod use_request;

pub use use_auth::{AuthHandle, use_auth};
pub use use_form::{FormHandle, FormValidator, use_form};
pub use use_request::{
    RequestHandle, use_delete, use_get, use_get_content, use_patch, use_post,
    use_put, use_request,
};
