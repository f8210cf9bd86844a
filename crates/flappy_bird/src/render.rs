//! Turns a session snapshot into an ordered list of draw calls. The list is
//! back to front: later commands cover earlier ones.

use core::f32::consts::PI;

use bevy::color::Color;
use bevy::math::Vec2;

use crate::session::Session;

/// Flat color behind everything, visible where the background image ends.
pub const SKY_COLOR: Color = Color::srgb(112.0 / 255.0, 197.0 / 255.0, 206.0 / 255.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    Pipe,
    Ground,
    /// Bird animation frame.
    Bird(u8),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Draws `image` with its top-left corner at `position`, rotated by
    /// `rotation` radians around that corner. `size` of `None` keeps the
    /// image's own size.
    Image {
        image: ImageId,
        position: Vec2,
        size: Option<Vec2>,
        rotation: f32,
    },
}

impl DrawCommand {
    const fn image(image: ImageId, position: Vec2, size: Option<Vec2>) -> Self {
        Self::Image {
            image,
            position,
            size,
            rotation: 0.0,
        }
    }
}

pub fn draw_commands(session: &Session) -> Vec<DrawCommand> {
    let config = session.config();
    let mut commands = vec![
        DrawCommand::Clear(SKY_COLOR),
        DrawCommand::image(
            ImageId::Background,
            Vec2::new(0.0, config.canvas_height - config.background_height),
            None,
        ),
    ];

    for pipe in session.pipes() {
        let size = Some(Vec2::new(pipe.width, config.pipe_length));
        // The top segment is the pipe image turned upside down, so it is
        // anchored on its far corner and ends on the gap's top edge.
        commands.push(DrawCommand::Image {
            image: ImageId::Pipe,
            position: Vec2::new(pipe.right(), pipe.gap_top()),
            size,
            rotation: PI,
        });
        commands.push(DrawCommand::image(
            ImageId::Pipe,
            Vec2::new(pipe.x, pipe.gap_bottom()),
            size,
        ));
    }

    // Two tiles back to back so the seam never shows.
    let ground_y = config.ground_y();
    let ground_x = -session.ground_offset();
    for x in [ground_x, ground_x + config.ground_tile_width] {
        commands.push(DrawCommand::image(
            ImageId::Ground,
            Vec2::new(x, ground_y),
            None,
        ));
    }

    let bird = session.bird();
    commands.push(DrawCommand::image(
        ImageId::Bird(bird.frame),
        Vec2::new(bird.x, bird.y),
        Some(Vec2::new(bird.width, bird.height)),
    ));

    commands
}
