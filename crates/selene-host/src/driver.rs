use crate::engine::ScriptEngine;
use crate::platform::Platform;
use crate::state::RuntimeState;
use crate::ScriptError;

/// Runs the script program: main entry once, then update/draw every tick
/// until `running` drops, then the exit callback exactly once.
///
/// A close request seen at the top of a tick stops the loop only after that
/// tick's update and draw. A stop requested by the main entry itself skips
/// the loop but still runs exit. If the main entry fails the error is logged and
/// returned without entering the loop or calling exit.
pub fn run_frames<P: Platform, E: ScriptEngine>(state: &mut RuntimeState<P, E>) -> Result<(), ScriptError> {
    if let Err(e) = state.call_main() {
        log::error!("script main: {e}");
        state.running = false;
        return Err(e);
    }

    while state.running {
        if state.platform.should_close() {
            state.running = false;
        }
        state.dispatch_events();
        state.call_update();
        state.call_draw();
    }

    state.call_exit();
    Ok(())
}
