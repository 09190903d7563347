pub mod custom_element;
