//! Request domain types

mod body;
mod method;
mod parameter;
mod spec;

pub use body::{ActiveBody, BodySelection, FileAttachment, FormDataEntry, RequestBody};
pub use method::HttpMethod;
pub use parameter::Parameter;
pub use spec::Request;
