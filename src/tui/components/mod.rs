//! Reusable UI components.

pub mod input_box;
pub mod landing;
pub mod logo;
pub mod message_list;
pub mod model_picker;
pub mod references_panel;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use landing::Landing;
pub use message_list::{MessageList, MessageListEvent, MessageListState};
pub use model_picker::{ModelPicker, ModelPickerEvent, ModelPickerState};
pub use references_panel::ReferencesPanel;
pub use title_bar::TitleBar;
