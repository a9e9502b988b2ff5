use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.new_grid" => if ru { "Новая сетка" } else { "New grid" },
        "menu.new_cube" => if ru { "Новый куб" } else { "New cube" },
        "menu.open" => if ru { "Открыть меш..." } else { "Open mesh..." },
        "menu.open_title" => if ru { "Открыть JSON меша" } else { "Open Mesh JSON" },
        "menu.save" => if ru { "Сохранить меш..." } else { "Save mesh..." },
        "menu.save_title" => if ru { "Сохранить JSON меша" } else { "Save Mesh JSON" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.undo" => if ru { "Отменить  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.redo" => if ru { "Повторить  Ctrl+Shift+Z" } else { "Redo  Ctrl+Shift+Z" },
        "menu.deselect_all" => if ru { "Снять выделение" } else { "Deselect all" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.options_panel" => if ru { "Параметры ExtruCut" } else { "ExtruCut options" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        // ── Toolbar ─────────────────────────────────────────
        "toolbar.extrucut" => if ru { "ExtruCut  E" } else { "ExtruCut  E" },
        "toolbar.extrucut_tip" => if ru {
            "Выдавить выделенные грани с кольцевыми разрезами"
        } else {
            "Extrude the selected faces with loop cuts"
        },
        "toolbar.commit" => if ru { "Применить  Enter" } else { "Apply  Enter" },
        "toolbar.cancel" => if ru { "Отмена  Esc" } else { "Cancel  Esc" },

        // ── Options window ──────────────────────────────────
        "options.title" => if ru { "ExtruCut" } else { "ExtruCut" },
        "options.distance" => if ru { "Расстояние" } else { "Distance" },
        "options.segments" => if ru { "Сегменты" } else { "Segments" },
        "options.by" => if ru { "Разбиение" } else { "Split by" },
        "options.count" => if ru { "Количество" } else { "Count" },
        "options.length" => if ru { "Длина" } else { "Length" },
        "options.position" => if ru { "Положение окна" } else { "Window position" },
        "options.invalid" => if ru { "Неверное значение" } else { "Invalid value" },

        // ── Status bar ──────────────────────────────────────
        "status.faces" => if ru { "Граней" } else { "Faces" },
        "status.verts" => if ru { "Вершин" } else { "Vertices" },
        "status.selected" => if ru { "Выделено" } else { "Selected" },
        "status.no_mesh" => if ru { "Нет меша" } else { "No mesh" },
        "status.ready" => if ru { "Готово" } else { "Ready" },

        // ── Hints ───────────────────────────────────────────
        "hint.select" => if ru {
            "Клик: выделить грань, Ctrl/Shift+клик: добавить, E: ExtruCut"
        } else {
            "Click: select face, Ctrl/Shift+click: toggle, E: ExtruCut"
        },
        "hint.main" => if ru {
            "ЛКМ: тянуть, Enter: применить, ПКМ/Esc: отмена"
        } else {
            "LMB: drag, Enter: apply, RMB/Esc: cancel"
        },
        "hint.displace" => if ru {
            "Тяните вдоль оси, Ctrl: шаг по длине сегмента, ПКМ/Esc: вернуть"
        } else {
            "Drag along the axis, Ctrl: snap to segment length, RMB/Esc: revert"
        },

        _ => "???",
    }
}
