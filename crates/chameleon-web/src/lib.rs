pub mod runner;

pub use runner::GameRunner;

use chameleon_core::session::custom;
use chameleon_core::{ChameleonQuest, Content, GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

/// Generate the `#[wasm_bindgen]` exports shared by every game: runner
/// storage, `with_runner()`, init/tick, input and buffer accessors.
///
/// `$make_game` is an expression producing the game from the `level: u32`
/// passed to `game_init`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal, |$level:ident| $make_game:expr) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init($level: u32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game: $game_type = $make_game;
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized at level {}", $game_name, $level);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}

export_game!(ChameleonQuest, "chameleon-quest", |level| {
    ChameleonQuest::new(GameConfig::default(), Content::builtin(), level)
});

// ---- Game-specific exports ----

/// Replace the built-in questions and entities. Returns an error message
/// the UI can show if the document is rejected.
#[wasm_bindgen]
pub fn game_load_content(json: &str) -> Result<(), JsValue> {
    let content = Content::from_json(json).map_err(|e| {
        let message = JsValue::from_str(&e.to_string());
        web_sys::console::warn_1(&message);
        message
    })?;
    with_runner(|r| {
        let now = r.now();
        r.game_mut().replace_content(content, now);
    });
    Ok(())
}

/// Copy of the last frame's wire events, for hosts that do not read wasm
/// memory directly.
#[wasm_bindgen]
pub fn get_game_events_array() -> js_sys::Float32Array {
    with_runner(|r| {
        let floats: Vec<f32> = r
            .game_events()
            .iter()
            .flat_map(|e| [e.kind, e.a, e.b, e.c])
            .collect();
        js_sys::Float32Array::from(floats.as_slice())
    })
}

#[wasm_bindgen]
pub fn game_set_level(level: u32) {
    with_runner(|r| r.game_mut().set_level(level));
}

#[wasm_bindgen]
pub fn game_use_help() {
    with_runner(|r| r.push_input(InputEvent::Custom { kind: custom::USE_HELP, a: 0.0 }));
}

#[wasm_bindgen]
pub fn game_restart() {
    with_runner(|r| r.push_input(InputEvent::Custom { kind: custom::RESTART, a: 0.0 }));
}

#[wasm_bindgen]
pub fn get_score() -> u32 {
    with_runner(|r| r.game().score().score())
}

#[wasm_bindgen]
pub fn get_strikes() -> u32 {
    with_runner(|r| r.game().score().strikes())
}

#[wasm_bindgen]
pub fn get_accuracy() -> f32 {
    with_runner(|r| r.game().score().accuracy())
}

#[wasm_bindgen]
pub fn get_help_remaining() -> u32 {
    with_runner(|r| r.game().help().remaining())
}

#[wasm_bindgen]
pub fn get_unlocked_count() -> u32 {
    with_runner(|r| r.game().encyclopedia().unlocked_count() as u32)
}

#[wasm_bindgen]
pub fn is_game_over() -> bool {
    with_runner(|r| r.game().is_game_over())
}

/// Ids of every entity caught correctly so far, in id order.
#[wasm_bindgen]
pub fn get_unlocked_entities() -> js_sys::Array {
    with_runner(|r| {
        r.game()
            .encyclopedia()
            .iter()
            .map(JsValue::from_str)
            .collect()
    })
}

/// Entity id for the catalog index carried by catch and discovery events.
#[wasm_bindgen]
pub fn get_entity_id(index: u32) -> Option<String> {
    with_runner(|r| {
        r.game()
            .content()
            .catalog
            .get_index(index as usize)
            .map(|e| e.id.clone())
    })
}

/// Label of an answer card by the tag written in its render instance.
#[wasm_bindgen]
pub fn get_answer_label(answer_id: u32) -> Option<String> {
    with_runner(|r| {
        let session = r.game();
        session
            .spawner()
            .answers()
            .chain(session.caught().map(|c| &c.card))
            .find(|a| a.id.0 == answer_id)
            .map(|a| a.label.clone())
    })
}

/// Text of a question card by its group tag.
#[wasm_bindgen]
pub fn get_question_text(group_id: u32) -> Option<String> {
    with_runner(|r| {
        r.game()
            .spawner()
            .questions()
            .find(|q| q.group.0 == group_id)
            .map(|q| q.text.clone())
    })
}
