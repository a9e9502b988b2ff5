//! JSON command protocol for scripted ExtruCut sessions.
//!
//! Every command maps onto a `TestHarness` call. Rejected commands return a
//! response with `success: false` instead of an error.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::MeshDescription;
use tracing::warn;

use crate::harness::TestHarness;
use crate::interaction::InputKey;
use crate::viewport::picking::Ray;

/// A command the agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Replace the mesh and enter edit mode
    LoadMesh {
        mesh: MeshDescription,
    },
    /// Replace the face selection by face indices
    SelectFaces {
        faces: Vec<u32>,
    },
    /// Start ExtruCut on the current selection
    Start,
    /// Set the extrusion distance; accepts a number or an expression
    SetDistance {
        value: String,
    },
    SetCount {
        value: i64,
    },
    /// Set the segment length; accepts a number or an expression
    SetLength {
        value: String,
    },
    /// "count" or "length"
    SetMode {
        mode: String,
    },
    /// Press a key or mouse button ("LEFTMOUSE", "RET", "ESC", ...)
    Press {
        key: String,
    },
    Release {
        key: String,
    },
    /// Move the pointer to a world-space ray
    MovePointer {
        origin: [f32; 3],
        direction: [f32; 3],
    },
    /// Drag from the current distance to `distance`
    DragTo {
        distance: f32,
    },
    /// Hold or release the snap modifier
    Modifier {
        held: bool,
    },
    /// Run one tick without input
    Update,
    Commit,
    Cancel,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Drop the tool and the mesh.
    Clear,
    /// Inspect mesh counts and tool state.
    Inspect,
    /// Validate mesh integrity.
    Validate,
    /// Export the mesh as JSON.
    ExportMesh,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        warn!("Command rejected: {msg}");
        Self {
            success: false,
            error: Some(msg),
            data: None,
        }
    }

    fn from_result(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::err(e),
        }
    }
}

fn parse_key(name: &str) -> Result<InputKey, String> {
    InputKey::parse(name).ok_or_else(|| format!("Unknown key: {name}"))
}

fn inspect(harness: &TestHarness) -> serde_json::Value {
    let tool = harness.app.tool.as_ref().map(|tool| {
        let plan = tool.plan();
        serde_json::json!({
            "state": format!("{:?}", tool.state()),
            "distance": tool.distance(),
            "segments": tool.segments(),
            "preview_verts": plan.verts.len(),
            "preview_edges": plan.edges.len(),
            "preview_faces": plan.sides.len() + plan.caps.len(),
        })
    });
    let options = harness.app.options();
    serde_json::json!({
        "vertex_count": harness.vertex_count(),
        "edge_count": harness.edge_count(),
        "face_count": harness.face_count(),
        "selected_faces": harness.selected_faces().iter().map(|f| f.0).collect::<Vec<_>>(),
        "hidden_faces": harness.hidden_face_count(),
        "options": options,
        "tool": tool,
        "last_commit": harness.last_commit().map(|r| serde_json::json!({
            "created_faces": r.created_faces.len(),
            "created_verts": r.created_verts.len(),
            "removed_faces": r.removed_faces,
            "failures": r.failures.len(),
        })),
    })
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::LoadMesh { mesh } => CommandResponse::from_result(harness.load_mesh(&mesh)),

        AgentCommand::SelectFaces { faces } => match harness.select_faces(&faces) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "selected": faces })),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Start => CommandResponse::from_result(harness.start_tool()),

        AgentCommand::SetDistance { value } => {
            CommandResponse::from_result(harness.set_distance_expr(&value))
        }

        AgentCommand::SetCount { value } => {
            harness.set_count(value);
            CommandResponse::ok_with_data(serde_json::json!({ "count": harness.app.options().count }))
        }

        AgentCommand::SetLength { value } => {
            CommandResponse::from_result(harness.set_length_expr(&value))
        }

        AgentCommand::SetMode { mode } => CommandResponse::from_result(harness.set_mode(&mode)),

        AgentCommand::Press { key } => match parse_key(&key) {
            Ok(key) => {
                let effect = harness.press(key);
                CommandResponse::ok_with_data(serde_json::json!({ "effect": format!("{:?}", effect) }))
            }
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Release { key } => match parse_key(&key) {
            Ok(key) => {
                let effect = harness.release(key);
                CommandResponse::ok_with_data(serde_json::json!({ "effect": format!("{:?}", effect) }))
            }
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::MovePointer { origin, direction } => {
            let dir = Vec3::from_array(direction);
            if dir.length_squared() == 0.0 {
                return CommandResponse::err("Pointer direction must be non-zero");
            }
            let effect = harness.move_pointer(Ray::new(Vec3::from_array(origin), dir));
            CommandResponse::ok_with_data(serde_json::json!({ "effect": format!("{:?}", effect) }))
        }

        AgentCommand::DragTo { distance } => match harness.drag_to(distance) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "distance": harness.distance() })),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Modifier { held } => {
            harness.modifier(held);
            CommandResponse::ok()
        }

        AgentCommand::Update => {
            let effect = harness.update();
            CommandResponse::ok_with_data(serde_json::json!({ "effect": format!("{:?}", effect) }))
        }

        AgentCommand::Commit => match harness.commit() {
            Ok(()) => CommandResponse::ok_with_data(inspect(harness)),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Cancel => CommandResponse::from_result(harness.cancel()),

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => CommandResponse::ok_with_data(inspect(harness)),

        AgentCommand::Validate => {
            let errors = harness.validate();
            CommandResponse::ok_with_data(serde_json::json!({
                "valid": errors.is_empty(),
                "errors": errors,
            }))
        }

        AgentCommand::ExportMesh => {
            let json = harness.export_mesh_json();
            CommandResponse::ok_with_data(serde_json::json!({ "mesh_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
