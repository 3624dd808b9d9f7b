//! Gesture controller: turns device events into live elements and board commits.

use crate::camera::Camera;
use crate::geometry::is_finite_point;
use crate::history::{BoardAction, BoardState};
use crate::input::{InputEvent, KeyEvent, KeyInput, MouseButton, PointerEvent, PointerInput, WheelInput};
use crate::redraw::RedrawScheduler;
use crate::scene::Scene;
use crate::shapes::{LiveElement, Shape, Stroke, StrokePoint, TEXT_SIZE_FACTOR, TextAnnotation};
use crate::tools::{ToolKind, ToolSettings};
use kurbo::{Point, Vec2};

/// Cursor hint for the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Cell,
    Text,
    Crosshair,
}

impl Cursor {
    /// CSS cursor name.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Cell => "cell",
            Cursor::Text => "text",
            Cursor::Crosshair => "crosshair",
        }
    }
}

/// Which gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    DrawingStroke,
    DrawingShape,
    PlacingText,
    Panning,
}

/// Inline text entry opened by the text tool.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrompt {
    world: Point,
    screen: Point,
    buffer: String,
}

impl TextPrompt {
    /// Where the committed text will be anchored.
    pub fn world(&self) -> Point {
        self.world
    }

    /// Where the prompt should be shown, in canvas pixels.
    pub fn screen(&self) -> Point {
        self.screen
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    DrawingStroke {
        pointer_id: u32,
        live: Stroke,
    },
    DrawingShape {
        pointer_id: u32,
        live: Shape,
    },
    PlacingText(TextPrompt),
    Panning {
        pointer_id: u32,
        /// Screen position where the drag started.
        origin: Point,
        start_offset: Vec2,
    },
}

/// The board: committed scene with history, view, tool settings and the
/// gesture in progress.
#[derive(Debug, Clone)]
pub struct Whiteboard {
    board: BoardState,
    camera: Camera,
    pub settings: ToolSettings,
    gesture: Gesture,
    space_held: bool,
    /// Top-left of the drawing surface in client coordinates.
    viewport_origin: Point,
    redraw: RedrawScheduler,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Whiteboard {
    pub fn new() -> Self {
        let mut redraw = RedrawScheduler::new();
        redraw.request();
        Self {
            board: BoardState::new(),
            camera: Camera::new(),
            settings: ToolSettings::new(),
            gesture: Gesture::Idle,
            space_held: false,
            viewport_origin: Point::ZERO,
            redraw,
        }
    }

    pub fn scene(&self) -> &Scene {
        self.board.scene()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn can_undo(&self) -> bool {
        self.board.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.board.can_redo()
    }

    pub fn set_viewport_origin(&mut self, origin: Point) {
        self.viewport_origin = origin;
    }

    /// Switch tools. A gesture already in progress keeps the tool it began with.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.settings.tool != tool {
            self.settings.tool = tool;
            self.redraw.request();
        }
    }

    /// The uncommitted element being drawn, if any.
    pub fn live_element(&self) -> Option<LiveElement<'_>> {
        match &self.gesture {
            Gesture::DrawingStroke { live, .. } => Some(LiveElement::Stroke(live)),
            Gesture::DrawingShape { live, .. } => Some(LiveElement::Shape(live)),
            _ => None,
        }
    }

    pub fn text_prompt(&self) -> Option<&TextPrompt> {
        match &self.gesture {
            Gesture::PlacingText(prompt) => Some(prompt),
            _ => None,
        }
    }

    pub fn mode(&self) -> GestureMode {
        match self.gesture {
            Gesture::Idle => GestureMode::Idle,
            Gesture::DrawingStroke { .. } => GestureMode::DrawingStroke,
            Gesture::DrawingShape { .. } => GestureMode::DrawingShape,
            Gesture::PlacingText(_) => GestureMode::PlacingText,
            Gesture::Panning { .. } => GestureMode::Panning,
        }
    }

    pub fn cursor(&self) -> Cursor {
        match self.settings.tool {
            _ if self.space_held => Cursor::Grab,
            ToolKind::Pan => Cursor::Grab,
            ToolKind::Eraser => Cursor::Cell,
            ToolKind::Text => Cursor::Text,
            _ => Cursor::Crosshair,
        }
    }

    pub fn zoom_percent(&self) -> u32 {
        self.camera.zoom_percent()
    }

    /// Consume a pending redraw, if any. Call once per display tick.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take_frame()
    }

    /// Route any input event. Returns true if the board changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Pointer(PointerEvent::Down(input)) => self.pointer_down(input),
            InputEvent::Pointer(PointerEvent::Move(input)) => self.pointer_move(input),
            InputEvent::Pointer(PointerEvent::Up(input)) => self.pointer_up(input),
            InputEvent::Pointer(PointerEvent::Cancel(input)) => self.pointer_cancel(input),
            InputEvent::Wheel(input) => self.wheel(input),
            InputEvent::Key(KeyEvent::Pressed(key)) => self.key_down(key),
            InputEvent::Key(KeyEvent::Released(key)) => self.key_up(key),
        }
    }

    /// Client coordinates to canvas pixels, or `None` for non-finite input.
    fn canvas_point(&self, client: Point) -> Option<Point> {
        if !is_finite_point(client) {
            log::warn!("Dropping pointer input with non-finite position {:?}", client);
            return None;
        }
        Some(client - self.viewport_origin.to_vec2())
    }

    pub fn pointer_down(&mut self, input: &PointerInput) -> bool {
        let Some(screen) = self.canvas_point(input.client()) else {
            return false;
        };

        // Clicking away from an open prompt is a focus loss.
        if matches!(self.gesture, Gesture::PlacingText(_)) {
            self.confirm_text();
        }
        if !matches!(self.gesture, Gesture::Idle) {
            log::debug!("Ignoring pointer {} down during a gesture", input.pointer_id);
            return false;
        }

        let tool = self.settings.tool;
        let is_pan = tool == ToolKind::Pan
            || self.space_held
            || input.button == Some(MouseButton::Middle);
        let world = self.camera.screen_to_world(screen);

        self.gesture = if is_pan {
            Gesture::Panning {
                pointer_id: input.pointer_id,
                origin: screen,
                start_offset: self.camera.offset,
            }
        } else if tool == ToolKind::Text {
            Gesture::PlacingText(TextPrompt {
                world,
                screen,
                buffer: String::new(),
            })
        } else if let Some(kind) = tool.shape_kind() {
            Gesture::DrawingShape {
                pointer_id: input.pointer_id,
                live: Shape::begin(
                    kind,
                    world,
                    self.settings.color,
                    self.settings.size(),
                    self.settings.opacity(),
                ),
            }
        } else if let Some(stroke_tool) = tool.stroke_tool() {
            Gesture::DrawingStroke {
                pointer_id: input.pointer_id,
                live: Stroke::begin(
                    stroke_tool,
                    self.settings.color,
                    self.settings.size(),
                    self.settings.opacity(),
                    StrokePoint::from_world(world, input.reported_pressure()),
                ),
            }
        } else {
            Gesture::Idle
        };

        self.redraw.request();
        true
    }

    pub fn pointer_move(&mut self, input: &PointerInput) -> bool {
        if !input.is_pressed() {
            return false;
        }
        let Some(screen) = self.canvas_point(input.client()) else {
            return false;
        };
        let world = self.camera.screen_to_world(screen);

        match &mut self.gesture {
            Gesture::Panning {
                pointer_id,
                origin,
                start_offset,
            } if *pointer_id == input.pointer_id => {
                self.camera.offset = *start_offset + (screen - *origin);
            }
            Gesture::DrawingShape { pointer_id, live } if *pointer_id == input.pointer_id => {
                live.set_second_corner(world);
            }
            Gesture::DrawingStroke { pointer_id, live } if *pointer_id == input.pointer_id => {
                live.add_point(StrokePoint::from_world(world, input.reported_pressure()));
            }
            _ => return false,
        }

        self.redraw.request();
        true
    }

    pub fn pointer_up(&mut self, input: &PointerInput) -> bool {
        self.end_gesture(input.pointer_id)
    }

    /// Treated like a release: whatever was drawn so far is kept.
    pub fn pointer_cancel(&mut self, input: &PointerInput) -> bool {
        self.end_gesture(input.pointer_id)
    }

    fn end_gesture(&mut self, released: u32) -> bool {
        let owner = match &self.gesture {
            Gesture::Panning { pointer_id, .. }
            | Gesture::DrawingShape { pointer_id, .. }
            | Gesture::DrawingStroke { pointer_id, .. } => *pointer_id,
            Gesture::Idle | Gesture::PlacingText(_) => return false,
        };
        if owner != released {
            return false;
        }

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::DrawingShape { live, .. } => {
                log::debug!("Committing {:?} shape {}", live.tool, live.id());
                self.board.dispatch(BoardAction::CommitShape(live));
            }
            Gesture::DrawingStroke { live, .. } => {
                let stroke = live.finish();
                log::debug!(
                    "Committing {:?} stroke {} ({} points, smoothed: {})",
                    stroke.tool,
                    stroke.id(),
                    stroke.len(),
                    stroke.smoothed_points.is_some()
                );
                self.board.dispatch(BoardAction::CommitStroke(stroke));
            }
            _ => {}
        }

        self.redraw.request();
        true
    }

    /// Zoom around the cursor.
    pub fn wheel(&mut self, input: &WheelInput) -> bool {
        let Some(screen) = self.canvas_point(input.client()) else {
            return false;
        };
        if !input.delta_y.is_finite() {
            log::warn!("Dropping wheel input with non-finite delta");
            return false;
        }
        self.camera.wheel_zoom(screen, input.delta_y);
        self.redraw.request();
        true
    }

    pub fn key_down(&mut self, key: &KeyInput) -> bool {
        if matches!(self.gesture, Gesture::PlacingText(_)) {
            return self.prompt_key(key);
        }

        if key.is_space() {
            self.space_held = true;
            self.redraw.request();
            return true;
        }

        let mods = key.modifiers;
        if mods.command() {
            match key.letter() {
                Some('z') if mods.shift => self.redo(),
                Some('z') => self.undo(),
                Some('y') => self.redo(),
                _ => false,
            }
        } else if key.key == "0" {
            self.reset_view()
        } else if let Some(tool) = ToolKind::from_hotkey(&key.key) {
            self.set_tool(tool);
            true
        } else {
            false
        }
    }

    pub fn key_up(&mut self, key: &KeyInput) -> bool {
        if key.is_space() && self.space_held {
            self.space_held = false;
            self.redraw.request();
            return true;
        }
        false
    }

    /// Keys delivered while the text prompt has focus.
    fn prompt_key(&mut self, key: &KeyInput) -> bool {
        match key.key.as_str() {
            "Enter" => self.confirm_text(),
            "Escape" => self.cancel_text(),
            "Backspace" => {
                let Gesture::PlacingText(prompt) = &mut self.gesture else {
                    return false;
                };
                if prompt.buffer.pop().is_none() {
                    return false;
                }
                self.redraw.request();
                true
            }
            text if !key.modifiers.command() && text.chars().count() == 1 => self.text_input(text),
            _ => false,
        }
    }

    /// Append typed text to the open prompt.
    pub fn text_input(&mut self, text: &str) -> bool {
        let Gesture::PlacingText(prompt) = &mut self.gesture else {
            return false;
        };
        let before = prompt.buffer.len();
        prompt.buffer.extend(text.chars().filter(|c| !c.is_control()));
        if prompt.buffer.len() == before {
            return false;
        }
        self.redraw.request();
        true
    }

    /// Close the prompt, committing its trimmed text if any is left.
    pub fn confirm_text(&mut self) -> bool {
        if !matches!(self.gesture, Gesture::PlacingText(_)) {
            return false;
        }
        let Gesture::PlacingText(prompt) = std::mem::replace(&mut self.gesture, Gesture::Idle)
        else {
            return false;
        };
        self.redraw.request();

        let size = self.settings.size() * TEXT_SIZE_FACTOR;
        match TextAnnotation::new(prompt.world, &prompt.buffer, self.settings.color, size) {
            Some(text) => {
                log::debug!("Committing text {} {:?}", text.id(), text.text);
                self.board.dispatch(BoardAction::CommitText(text));
            }
            None => log::debug!("Discarding empty text prompt"),
        }
        true
    }

    /// Close the prompt without committing.
    pub fn cancel_text(&mut self) -> bool {
        if !matches!(self.gesture, Gesture::PlacingText(_)) {
            return false;
        }
        self.gesture = Gesture::Idle;
        self.redraw.request();
        true
    }

    pub fn undo(&mut self) -> bool {
        if !self.board.can_undo() {
            return false;
        }
        self.board.dispatch(BoardAction::Undo);
        self.redraw.request();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.board.can_redo() {
            return false;
        }
        self.board.dispatch(BoardAction::Redo);
        self.redraw.request();
        true
    }

    /// Empty the board. Undoable.
    pub fn clear(&mut self) -> bool {
        self.board.dispatch(BoardAction::Clear);
        self.redraw.request();
        true
    }

    pub fn reset_view(&mut self) -> bool {
        self.camera.reset();
        self.redraw.request();
        true
    }

    /// Replace the board with a restored scene, dropping history.
    pub fn load_scene(&mut self, scene: Scene) {
        self.gesture = Gesture::Idle;
        self.board.dispatch(BoardAction::Load(scene));
        self.redraw.request();
    }
}
