use std::path::Path;

use selene_engine::coords::{Rect, Vec2};
use selene_engine::input::InputEvent;
use selene_engine::paint::Color;

use crate::ScriptError;

/// Arguments for creating a script engine.
#[derive(Debug, Clone)]
pub struct EngineInit {
    /// Process arguments, forwarded verbatim.
    pub args: Vec<String>,
    /// Normalized base directory (ends in `/`).
    pub base_path: String,
}

/// Read-only host values visible to scripts during one callback.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HostSnapshot {
    /// Seconds taken by the last frame.
    pub frame_time: f32,
    pub screen_size: Vec2,
    /// Pointer position with mouse offset and scale applied.
    pub mouse_position: Vec2,
    pub resolution: Vec2,
}

/// Request issued by a script. Applied by the host after the callback
/// returns, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    SetWindowSize { width: u32, height: u32 },
    SetMouseOffset(Vec2),
    SetMouseScale(Vec2),
    ClearBackground(Color),
    DrawRectangle { rect: Rect, color: Color },
    DrawText { text: String, position: Vec2, size: f32, color: Color },
    /// Stops the frame loop after the current tick.
    CloseWindow,
    InitAudioDevice,
    CloseAudioDevice,
    SetShaderLocation { index: usize, value: i32 },
}

impl HostCommand {
    /// Commands that only make sense between begin/end drawing.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            HostCommand::ClearBackground(_) | HostCommand::DrawRectangle { .. } | HostCommand::DrawText { .. }
        )
    }
}

/// Context handed to every engine callback.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct HostCtx {
    snapshot: HostSnapshot,
    commands: Vec<HostCommand>,
}

impl HostCtx {
    pub fn new(snapshot: HostSnapshot) -> Self {
        Self { snapshot, commands: Vec::new() }
    }

    #[inline]
    pub fn snapshot(&self) -> HostSnapshot {
        self.snapshot
    }

    #[inline]
    pub fn push(&mut self, cmd: HostCommand) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = HostCommand>) {
        self.commands.extend(cmds);
    }

    /// Commands issued so far in this callback.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub(crate) fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Script engine capability.
///
/// Every callback is synchronous and run-to-completion. An engine value
/// only exists once fully initialized; dropping it (or [`ScriptEngine::close`])
/// releases the interpreter.
pub trait ScriptEngine {
    /// Loads the entry script and runs its init callback.
    fn call_main(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError>;

    fn call_update(&mut self, ctx: &mut HostCtx, delta: f32) -> Result<(), ScriptError>;

    fn call_draw(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError>;

    fn call_exit(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError>;

    /// Delivers one input event. Engines without an event callback ignore it.
    fn call_event(&mut self, _ctx: &mut HostCtx, _event: &InputEvent) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Executes a script file outside the frame loop (interpret mode).
    fn run_file(&mut self, path: &Path) -> Result<(), ScriptError>;

    /// Human-readable interpreter version, for the startup banner.
    fn version(&self) -> &str {
        ""
    }

    fn close(self)
    where
        Self: Sized,
    {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_commands_are_classified() {
        assert!(HostCommand::ClearBackground(Color::BLACK).is_draw());
        assert!(!HostCommand::CloseWindow.is_draw());
        assert!(!HostCommand::SetShaderLocation { index: 0, value: 1 }.is_draw());
    }

    #[test]
    fn commands_keep_issue_order() {
        let mut ctx = HostCtx::new(HostSnapshot::default());
        ctx.push(HostCommand::InitAudioDevice);
        ctx.extend([HostCommand::CloseWindow, HostCommand::CloseAudioDevice]);
        assert_eq!(
            ctx.take_commands(),
            vec![HostCommand::InitAudioDevice, HostCommand::CloseWindow, HostCommand::CloseAudioDevice]
        );
        assert!(ctx.take_commands().is_empty());
    }
}
