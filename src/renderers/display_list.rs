//! DisplayList — a surface that records drawing calls.
//!
//! A browser host replays the serialized commands onto an HTML canvas 2D
//! context, one command per context call.

use serde::{Deserialize, Serialize};

use super::{Paint, PathShape, Surface, TextRun};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    BeginFrame { width: f64, height: f64 },
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Scale { factor: f64 },
    Path { shape: PathShape, paint: Paint },
    Text { run: TextRun },
    EndFrame,
}

#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { run } => Some(run),
            _ => None,
        })
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.commands)?)
    }

    /// Play the recorded commands onto another surface.
    pub fn replay(&self, target: &mut dyn Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::BeginFrame { width, height } => target.begin_frame(*width, *height),
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::Translate { dx, dy } => target.translate(*dx, *dy),
                DrawCommand::Scale { factor } => target.scale(*factor),
                DrawCommand::Path { shape, paint } => target.draw_path(shape, paint),
                DrawCommand::Text { run } => target.draw_text(run),
                DrawCommand::EndFrame => target.end_frame(),
            }
        }
    }
}

impl Surface for DisplayList {
    fn begin_frame(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::BeginFrame { width, height });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn scale(&mut self, factor: f64) {
        self.commands.push(DrawCommand::Scale { factor });
    }

    fn draw_path(&mut self, shape: &PathShape, paint: &Paint) {
        self.commands.push(DrawCommand::Path {
            shape: shape.clone(),
            paint: *paint,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(DrawCommand::Text { run: run.clone() });
    }

    fn end_frame(&mut self) {
        self.commands.push(DrawCommand::EndFrame);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::renderers::Color;

    #[test]
    fn test_begin_frame_clears_previous_frame() {
        let mut list = DisplayList::new();
        list.begin_frame(10.0, 10.0);
        list.save();
        list.end_frame();
        list.begin_frame(20.0, 20.0);
        assert_eq!(
            list.commands(),
            &[DrawCommand::BeginFrame {
                width: 20.0,
                height: 20.0
            }]
        );
    }

    #[test]
    fn test_json_tags_commands() {
        let mut list = DisplayList::new();
        list.translate(1.0, 2.0);
        list.draw_path(
            &PathShape::Rect {
                rect: Rect::new(0.0, 0.0, 5.0, 5.0),
            },
            &Paint::fill(Color::WHITE),
        );
        let v: serde_json::Value = serde_json::from_str(&list.to_json().unwrap()).unwrap();
        assert_eq!(v[0]["op"], "translate");
        assert_eq!(v[1]["op"], "path");
        assert_eq!(v[1]["shape"]["type"], "rect");
        assert_eq!(v[1]["paint"]["fill"]["r"], 255);
        assert!(v[1]["paint"].get("stroke").is_none());
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let mut list = DisplayList::new();
        list.begin_frame(100.0, 50.0);
        list.save();
        list.scale(2.0);
        list.restore();
        list.end_frame();

        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy.commands(), list.commands());
    }
}
