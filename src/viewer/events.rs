//! Keyboard handling for `XlPlay`.
//!
//! All methods here are `pub(crate)` helpers called from the wasm-exported
//! public API that lives in `mod.rs`. Title commit and cancel are reachable
//! without pointer input; Escape additionally leaves fullscreen when no
//! edit is in progress.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use super::{now_ms, SharedState, XlPlay};
#[cfg(target_arch = "wasm32")]
use crate::player::SurfaceId;
#[cfg(target_arch = "wasm32")]
use crate::title::{action_for_key, TitleAction};

#[cfg(target_arch = "wasm32")]
impl XlPlay {
    pub(crate) fn internal_key(state: &Rc<RefCell<SharedState>>, key: &str) -> bool {
        let s = &mut *state.borrow_mut();

        if s.player.title().is_editing() {
            match action_for_key(key) {
                Some(TitleAction::Commit) => {
                    s.player.save_title(now_ms());
                    Self::paint_surface(s, SurfaceId::Preview);
                    if s.fullscreen.is_some() {
                        Self::paint_surface(s, SurfaceId::Fullscreen);
                    }
                    return true;
                }
                Some(TitleAction::Cancel) => {
                    s.player.title_mut().cancel();
                    return true;
                }
                None => return false,
            }
        }

        if key == "Escape" && s.fullscreen.is_some() {
            if let Some(mut binding) = s.fullscreen.take() {
                s.player.exit_fullscreen(&mut binding.sched);
            }
            return true;
        }

        false
    }
}
