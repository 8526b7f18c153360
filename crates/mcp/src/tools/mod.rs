pub mod volume;
mod registry;

pub use registry::{json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry};
pub use volume::{
    ApplyPresetTool, GetVolumeTool, MuteTool, SetVolumeTool, ToggleMuteTool, UnmuteTool,
};
