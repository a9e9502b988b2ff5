//! Input mapping for the ExtruCut tool
//!
//! Raw pointer and key events are mapped onto three logical actions and
//! collected into one `InputFrame` per tick. The frame holds edge-triggered
//! pressed/released flags plus level state (modifier, latest pointer ray).

use std::fmt;

use glam::{Mat4, Vec3};

use crate::viewport::picking::{closest_point_on_line, Ray};

/// Logical tool actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Start/hold a drag along the extrusion axis
    Displace,
    Commit,
    Cancel,
}

/// Physical inputs the keymap understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    LeftMouse,
    RightMouse,
    Enter,
    Escape,
    /// Letter keys, upper case
    Char(char),
}

impl InputKey {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "LEFTMOUSE" => Some(InputKey::LeftMouse),
            "RIGHTMOUSE" => Some(InputKey::RightMouse),
            "RET" | "ENTER" | "RETURN" => Some(InputKey::Enter),
            "ESC" | "ESCAPE" => Some(InputKey::Escape),
            s if s.chars().count() == 1 => s.chars().next().map(InputKey::Char),
            _ => None,
        }
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKey::LeftMouse => write!(f, "LEFTMOUSE"),
            InputKey::RightMouse => write!(f, "RIGHTMOUSE"),
            InputKey::Enter => write!(f, "RET"),
            InputKey::Escape => write!(f, "ESC"),
            InputKey::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A key with its required modifier state, e.g. `CTRL+LEFTMOUSE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: InputKey,
    pub ctrl: bool,
}

impl KeyChord {
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut ctrl = false;
        let mut key = None;
        for part in s.split('+') {
            match part.trim().to_uppercase().as_str() {
                "CTRL" => ctrl = true,
                other => {
                    key = Some(
                        InputKey::parse(other).ok_or_else(|| format!("Unknown key: {}", other))?,
                    )
                }
            }
        }
        let key = key.ok_or_else(|| format!("No key in chord: {}", s))?;
        Ok(Self { key, ctrl })
    }

    pub fn matches(&self, key: InputKey, ctrl: bool) -> bool {
        self.key == key && self.ctrl == ctrl
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "CTRL+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Action bindings
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    bindings: Vec<(Action, KeyChord)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let table: [(Action, &str); 5] = [
            (Action::Displace, "LEFTMOUSE"),
            (Action::Displace, "CTRL+LEFTMOUSE"),
            (Action::Commit, "RET"),
            (Action::Cancel, "RIGHTMOUSE"),
            (Action::Cancel, "ESC"),
        ];
        let bindings = table
            .iter()
            .filter_map(|(action, chord)| KeyChord::parse(chord).ok().map(|c| (*action, c)))
            .collect();
        Self { bindings }
    }
}

impl Keymap {
    pub fn bind(&mut self, action: Action, chord: KeyChord) {
        if !self.bindings.contains(&(action, chord)) {
            self.bindings.push((action, chord));
        }
    }

    /// Actions bound to `key` with the given modifier state
    pub fn actions_for(&self, key: InputKey, ctrl: bool) -> impl Iterator<Item = Action> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, chord)| chord.matches(key, ctrl))
            .map(|(action, _)| *action)
    }

    pub fn chords_for(&self, action: Action) -> Vec<KeyChord> {
        self.bindings
            .iter()
            .filter(|(a, _)| *a == action)
            .map(|(_, c)| *c)
            .collect()
    }
}

/// Per-action edge flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFlags {
    pub displace: bool,
    pub commit: bool,
    pub cancel: bool,
}

impl ActionFlags {
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Displace => self.displace,
            Action::Commit => self.commit,
            Action::Cancel => self.cancel,
        }
    }

    pub fn set(&mut self, action: Action) {
        match action {
            Action::Displace => self.displace = true,
            Action::Commit => self.commit = true,
            Action::Cancel => self.cancel = true,
        }
    }
}

/// Everything the tool needs to know about input since the last tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub pressed: ActionFlags,
    pub released: ActionFlags,
    pub pointer_moved: bool,
    /// Snap modifier held
    pub modifier: bool,
    /// Latest world-space pointer ray
    pub ray: Option<Ray>,
}

impl InputFrame {
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.get(action)
    }

    pub fn released(&self, action: Action) -> bool {
        self.released.get(action)
    }

    pub fn with_press(mut self, action: Action) -> Self {
        self.pressed.set(action);
        self
    }

    pub fn with_release(mut self, action: Action) -> Self {
        self.released.set(action);
        self
    }

    pub fn with_move(mut self, ray: Ray) -> Self {
        self.pointer_moved = true;
        self.ray = Some(ray);
        self
    }

    pub fn with_modifier(mut self, held: bool) -> Self {
        self.modifier = held;
        self
    }
}

/// Raw input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Press(InputKey),
    Release(InputKey),
    PointerMoved(Ray),
    Modifier(bool),
}

/// Collects raw events into input frames
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    pub keymap: Keymap,
    frame: InputFrame,
}

impl InteractionController {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            frame: InputFrame::default(),
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(key) => {
                let ctrl = self.frame.modifier;
                for action in self.keymap.actions_for(key, ctrl).collect::<Vec<_>>() {
                    self.frame.pressed.set(action);
                }
            }
            InputEvent::Release(key) => {
                // Releases ignore the modifier so a drag ends however it started
                for ctrl in [false, true] {
                    for action in self.keymap.actions_for(key, ctrl).collect::<Vec<_>>() {
                        self.frame.released.set(action);
                    }
                }
            }
            InputEvent::PointerMoved(ray) => {
                self.frame.pointer_moved = true;
                self.frame.ray = Some(ray);
            }
            InputEvent::Modifier(held) => self.frame.modifier = held,
        }
    }

    /// Current frame; edge flags are cleared, level state is kept
    pub fn take_frame(&mut self) -> InputFrame {
        let frame = self.frame;
        self.frame.pressed = ActionFlags::default();
        self.frame.released = ActionFlags::default();
        self.frame.pointer_moved = false;
        frame
    }

    pub fn peek(&self) -> &InputFrame {
        &self.frame
    }
}

/// Drag start: distance and axis point under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub start_distance: f32,
    pub start_point: Vec3,
}

/// Point on the extrusion axis (mesh-local) closest to a world-space pointer ray
pub fn project_pointer(ray: &Ray, axis_point: Vec3, direction: Vec3, world: &Mat4) -> Vec3 {
    let local = ray.transformed(&world.inverse());
    closest_point_on_line(&local, axis_point, direction)
}

/// Distance after dragging from the anchor to `point`
pub fn drag_distance(anchor: &DragAnchor, point: Vec3, direction: Vec3) -> f32 {
    anchor.start_distance + direction.dot(point - anchor.start_point)
}

/// Round to the nearest multiple of `length`
pub fn snap_distance(distance: f32, length: f32) -> f32 {
    if length <= 0.0 || !length.is_finite() {
        return distance;
    }
    (distance / length).round() * length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, z: f32) -> Ray {
        // Horizontal ray crossing the Z axis at height z
        Ray::new(Vec3::new(x, -10.0, z), Vec3::Y)
    }

    #[test]
    fn test_chord_parse() {
        let chord = KeyChord::parse("CTRL+LEFTMOUSE").unwrap();
        assert_eq!(chord.key, InputKey::LeftMouse);
        assert!(chord.ctrl);
        assert_eq!(chord.to_string(), "CTRL+LEFTMOUSE");
        assert_eq!(KeyChord::parse("ret").unwrap().key, InputKey::Enter);
        assert!(KeyChord::parse("CTRL+").is_err());
        assert!(KeyChord::parse("HYPERKEY").is_err());
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.chords_for(Action::Displace).len(), 2);
        assert_eq!(
            keymap.actions_for(InputKey::Enter, false).collect::<Vec<_>>(),
            vec![Action::Commit]
        );
        assert_eq!(
            keymap.actions_for(InputKey::LeftMouse, true).collect::<Vec<_>>(),
            vec![Action::Displace]
        );
        assert_eq!(
            keymap.actions_for(InputKey::Escape, false).collect::<Vec<_>>(),
            vec![Action::Cancel]
        );
        assert_eq!(keymap.actions_for(InputKey::Enter, true).count(), 0);
    }

    #[test]
    fn test_controller_collects_edges() {
        let mut c = InteractionController::default();
        c.handle(InputEvent::Modifier(true));
        c.handle(InputEvent::Press(InputKey::LeftMouse));
        c.handle(InputEvent::PointerMoved(down_ray(0.0, 1.0)));

        let frame = c.take_frame();
        assert!(frame.pressed(Action::Displace));
        assert!(frame.pointer_moved);
        assert!(frame.modifier);

        let next = c.take_frame();
        assert!(!next.pressed(Action::Displace));
        assert!(!next.pointer_moved);
        assert!(next.modifier);
        assert_eq!(next.ray, Some(down_ray(0.0, 1.0)));
    }

    #[test]
    fn test_release_ignores_modifier_change() {
        let mut c = InteractionController::default();
        c.handle(InputEvent::Press(InputKey::LeftMouse));
        c.handle(InputEvent::Modifier(true));
        c.handle(InputEvent::Release(InputKey::LeftMouse));
        let frame = c.take_frame();
        assert!(frame.pressed(Action::Displace));
        assert!(frame.released(Action::Displace));
    }

    #[test]
    fn test_project_pointer_local_space() {
        let world = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        // World ray crosses the translated axis at z = 2
        let ray = Ray::new(Vec3::new(5.0, -10.0, 2.0), Vec3::Y);
        let p = project_pointer(&ray, Vec3::ZERO, Vec3::Z, &world);
        assert!((p - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_drag_distance() {
        let anchor = DragAnchor {
            start_distance: 1.0,
            start_point: Vec3::new(0.0, 0.0, 0.5),
        };
        assert!((drag_distance(&anchor, Vec3::new(0.0, 0.0, 2.0), Vec3::Z) - 2.5).abs() < 1e-6);
        assert!((drag_distance(&anchor, Vec3::ZERO, Vec3::Z) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_snap_distance_rounds_to_nearest() {
        assert!((snap_distance(1.2, 0.5) - 1.0).abs() < 1e-6);
        assert!((snap_distance(1.3, 0.5) - 1.5).abs() < 1e-6);
        assert!((snap_distance(-0.8, 0.5) + 1.0).abs() < 1e-6);
        assert_eq!(snap_distance(1.3, 0.0), 1.3);
    }
}
