//! Serializers from derived artifacts to file contents.

pub mod properties;
pub mod template;
pub mod xml;

pub use properties::render_properties;
pub use template::ScriptTemplater;
pub use xml::render_hadoop_xml;
