use serde::{Deserialize, Serialize};

pub mod parameters;

pub use parameters::{evaluate_number, ParameterError, ParameterResult};

/// Количество сегментов по умолчанию
pub const DEFAULT_SEGMENT_COUNT: u32 = 5;
/// Длина сегмента по умолчанию
pub const DEFAULT_SEGMENT_LENGTH: f32 = 0.5;
/// Минимальная длина сегмента (меньшие значения зажимаются)
pub const MIN_SEGMENT_LENGTH: f32 = 0.001;
/// Якорь окна параметров по умолчанию (правый верхний угол, как на numpad)
pub const DEFAULT_PANEL_ANCHOR: u8 = 9;

/// Способ разбиения выдавливания на сегменты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Фиксированное количество сегментов
    #[default]
    Count,
    /// Количество определяется длиной сегмента
    Length,
}

impl SegmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentMode::Count => "count",
            SegmentMode::Length => "length",
        }
    }

    /// Разбор без учёта регистра ("Count", "LENGTH", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "count" => Some(SegmentMode::Count),
            "length" => Some(SegmentMode::Length),
            _ => None,
        }
    }

    pub fn all() -> &'static [SegmentMode] {
        &[SegmentMode::Count, SegmentMode::Length]
    }
}

/// Положение окна параметров: якорь 1..=9 (раскладка numpad) или точка на экране
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelPosition {
    Anchor(u8),
    Point([f32; 2]),
}

impl Default for PanelPosition {
    fn default() -> Self {
        PanelPosition::Anchor(DEFAULT_PANEL_ANCHOR)
    }
}

impl PanelPosition {
    /// Якорь с зажатием в диапазон 1..=9
    pub fn anchor(value: u8) -> Self {
        PanelPosition::Anchor(value.clamp(1, 9))
    }

    /// Доли ширины и высоты области для якоря (7: левый верхний угол, 5: центр,
    /// 3: правый нижний). Для `Point` возвращает `None`.
    pub fn anchor_fractions(&self) -> Option<[f32; 2]> {
        match *self {
            PanelPosition::Anchor(a) => {
                let k = a.clamp(1, 9) - 1;
                let col = (k % 3) as f32 * 0.5;
                let row = (2 - k / 3) as f32 * 0.5;
                Some([col, row])
            }
            PanelPosition::Point(_) => None,
        }
    }
}

fn default_count() -> u32 {
    DEFAULT_SEGMENT_COUNT
}

fn default_length() -> f32 {
    DEFAULT_SEGMENT_LENGTH
}

/// Сохраняемые параметры инструмента ExtruCut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtruCutOptions {
    #[serde(default)]
    pub by: SegmentMode,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_length")]
    pub length: f32,
    #[serde(default)]
    pub position: PanelPosition,
}

impl Default for ExtruCutOptions {
    fn default() -> Self {
        Self {
            by: SegmentMode::Count,
            count: DEFAULT_SEGMENT_COUNT,
            length: DEFAULT_SEGMENT_LENGTH,
            position: PanelPosition::default(),
        }
    }
}

impl ExtruCutOptions {
    /// Установить количество сегментов (не меньше 1) и переключиться в режим `count`
    pub fn set_count(&mut self, value: i64) {
        self.count = value.clamp(1, u32::MAX as i64) as u32;
        self.by = SegmentMode::Count;
    }

    /// Установить длину сегмента (не меньше `MIN_SEGMENT_LENGTH`) и переключиться в режим `length`
    pub fn set_length(&mut self, value: f32) {
        self.length = value.max(MIN_SEGMENT_LENGTH);
        self.by = SegmentMode::Length;
    }

    pub fn set_mode(&mut self, mode: SegmentMode) {
        self.by = mode;
    }

    pub fn set_position(&mut self, position: PanelPosition) {
        self.position = match position {
            PanelPosition::Anchor(a) => PanelPosition::anchor(a),
            point => point,
        };
    }

    /// Длина сегмента с учётом минимального значения (на случай ручной правки файла)
    pub fn effective_length(&self) -> f32 {
        if self.length.is_nan() {
            return MIN_SEGMENT_LENGTH;
        }
        self.length.max(MIN_SEGMENT_LENGTH)
    }
}

/// Описание полигональной сетки (формат JSON-файла)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshDescription {
    pub positions: Vec<[f32; 3]>,
    /// Грани как упорядоченные списки индексов вершин
    pub faces: Vec<Vec<u32>>,
    /// Индексы выделенных граней
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_faces: Vec<u32>,
}

impl MeshDescription {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Заменить выделение граней
    pub fn with_selection(mut self, faces: impl IntoIterator<Item = u32>) -> Self {
        self.selected_faces = faces.into_iter().collect();
        self.selected_faces.sort_unstable();
        self.selected_faces.dedup();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    // --- SegmentMode ---

    #[test]
    fn test_segment_mode_serde() {
        let json = serde_json::to_string(&SegmentMode::Count).unwrap();
        assert_eq!(json, r#""count""#);
        let json = serde_json::to_string(&SegmentMode::Length).unwrap();
        assert_eq!(json, r#""length""#);
    }

    #[test]
    fn test_segment_mode_parse_case_insensitive() {
        assert_eq!(SegmentMode::parse("Count"), Some(SegmentMode::Count));
        assert_eq!(SegmentMode::parse(" LENGTH "), Some(SegmentMode::Length));
        assert_eq!(SegmentMode::parse("width"), None);
    }

    // --- ExtruCutOptions ---

    #[test]
    fn test_options_defaults() {
        let o = ExtruCutOptions::default();
        assert_eq!(o.by, SegmentMode::Count);
        assert_eq!(o.count, 5);
        assert_eq!(o.length, 0.5);
        assert_eq!(o.position, PanelPosition::Anchor(9));
    }

    #[test]
    fn test_options_default_json_shape() {
        let json = serde_json::to_string(&ExtruCutOptions::default()).unwrap();
        assert_eq!(json, r#"{"by":"count","count":5,"length":0.5,"position":9}"#);
    }

    #[test]
    fn test_options_missing_fields_use_defaults() {
        let o: ExtruCutOptions = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        assert_eq!(o.count, 12);
        assert_eq!(o.by, SegmentMode::Count);
        assert_eq!(o.length, 0.5);
        assert_eq!(o.position, PanelPosition::Anchor(9));
    }

    #[test]
    fn test_options_point_position_serde() {
        let mut o = ExtruCutOptions::default();
        o.set_position(PanelPosition::Point([120.0, 40.0]));
        roundtrip(&o);
        let json = serde_json::to_string(&o).unwrap();
        assert!(json.contains(r#""position":[120.0,40.0]"#));
    }

    #[test]
    fn test_set_count_clamps_and_switches_mode() {
        let mut o = ExtruCutOptions::default();
        o.set_mode(SegmentMode::Length);
        o.set_count(0);
        assert_eq!(o.count, 1);
        assert_eq!(o.by, SegmentMode::Count);
        o.set_count(-7);
        assert_eq!(o.count, 1);
        o.set_count(42);
        assert_eq!(o.count, 42);
    }

    #[test]
    fn test_set_length_clamps_and_switches_mode() {
        let mut o = ExtruCutOptions::default();
        o.set_length(0.0);
        assert_eq!(o.length, MIN_SEGMENT_LENGTH);
        assert_eq!(o.by, SegmentMode::Length);
        o.set_length(0.25);
        assert_eq!(o.length, 0.25);
    }

    #[test]
    fn test_anchor_clamped() {
        let mut o = ExtruCutOptions::default();
        o.set_position(PanelPosition::Anchor(0));
        assert_eq!(o.position, PanelPosition::Anchor(1));
        o.set_position(PanelPosition::Anchor(20));
        assert_eq!(o.position, PanelPosition::Anchor(9));
    }

    #[test]
    fn test_anchor_fractions_follow_numpad_layout() {
        assert_eq!(PanelPosition::Anchor(7).anchor_fractions(), Some([0.0, 0.0]));
        assert_eq!(PanelPosition::Anchor(9).anchor_fractions(), Some([1.0, 0.0]));
        assert_eq!(PanelPosition::Anchor(5).anchor_fractions(), Some([0.5, 0.5]));
        assert_eq!(PanelPosition::Anchor(1).anchor_fractions(), Some([0.0, 1.0]));
        assert_eq!(PanelPosition::Anchor(3).anchor_fractions(), Some([1.0, 1.0]));
        assert_eq!(PanelPosition::Point([10.0, 20.0]).anchor_fractions(), None);
    }

    #[test]
    fn test_effective_length_guards_hand_edited_values() {
        let o: ExtruCutOptions = serde_json::from_str(r#"{"length": -1.0}"#).unwrap();
        assert_eq!(o.effective_length(), MIN_SEGMENT_LENGTH);
    }

    // --- MeshDescription ---

    #[test]
    fn test_mesh_description_serde() {
        let m = MeshDescription {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
            faces: vec![vec![0, 1, 2]],
            selected_faces: vec![0],
        };
        roundtrip(&m);
    }

    #[test]
    fn test_mesh_description_selection_optional() {
        let m: MeshDescription =
            serde_json::from_str(r#"{"positions": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}"#)
                .unwrap();
        assert!(m.selected_faces.is_empty());
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("selected_faces"));
    }

    #[test]
    fn test_with_selection_sorted_unique() {
        let m = MeshDescription::default().with_selection([3, 1, 3, 2]);
        assert_eq!(m.selected_faces, vec![1, 2, 3]);
    }
}
