use super::model::{Card, Frame, Screen};
use super::{
    ACTION_DISC_RADIUS, ACTION_ICON_SIZE, BAR_HEIGHT, BAR_ICON_SIZE, CARD_PADDING, THUMB_RADIUS,
    TOGGLE_ICON_SIZE, TOGGLE_RADIUS, TOP_BAR_HEIGHT,
};
use crate::config::Glyph;
use crate::gui::geometry::{Point, Rect};
use crate::gui::theme::ThemeColors;
use cairo::{Context, LinearGradient};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use std::time::Instant;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct CardRenderer<'a> {
    card: &'a Card,
    rect: Rect,
    label: String,
    thumbnail: Option<&'a Pixbuf>,
}

impl<'a> CardRenderer<'a> {
    fn new(card: &'a Card, rect: Rect, index: usize, thumbnail: Option<&'a Pixbuf>) -> Self {
        Self {
            card,
            rect,
            label: format!("Text {}", index + 1),
            thumbnail,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let fill = self.rect.inset(CARD_PADDING);
        set_source(cr, self.card.color);
        cr.rectangle(fill.x, fill.y, fill.width, fill.height);
        cr.fill()?;

        let thumb_center = Point::new(
            fill.x + fill.width / 2.0,
            fill.y + fill.height / 2.0 - THUMB_RADIUS / 2.0,
        );
        self.draw_thumbnail(cr, colors, thumb_center)?;

        set_source(cr, colors.card_label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(16.0);
        if let Ok(ext) = cr.text_extents(&self.label) {
            cr.move_to(
                thumb_center.x - ext.width() / 2.0,
                thumb_center.y + THUMB_RADIUS + 24.0,
            );
            cr.show_text(&self.label)?;
        }
        Ok(())
    }

    fn draw_thumbnail(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        center: Point,
    ) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.arc(center.x, center.y, THUMB_RADIUS, 0.0, 2.0 * PI);
        cr.clip();

        if let Some(pixbuf) = self.thumbnail {
            let scale = (THUMB_RADIUS * 2.0) / pixbuf.width().max(pixbuf.height()) as f64;
            cr.translate(center.x - THUMB_RADIUS, center.y - THUMB_RADIUS);
            cr.scale(scale, scale);
            cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
            cr.paint()?;
        } else {
            // Placeholder disc with a smaller accent dot.
            set_source(cr, colors.sheet);
            cr.paint()?;
            set_source(cr, self.card.color);
            cr.arc(center.x, center.y, THUMB_RADIUS * 0.45, 0.0, 2.0 * PI);
            cr.fill()?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    screen: &Screen,
    colors: &ThemeColors,
    thumbnail: Option<&Pixbuf>,
    now: Instant,
) -> Result<(), cairo::Error> {
    let frame = screen.frame(now);

    set_source(cr, colors.background);
    cr.paint()?;

    draw_grid(cr, screen, colors, thumbnail)?;
    draw_top_bar(cr, screen, colors)?;
    if frame.panel_visible {
        draw_panel(cr, screen, colors, &frame)?;
    }
    draw_bar(cr, screen, colors, &frame)?;
    Ok(())
}

const TITLE: &str = "Animate Floating Action Menu";

fn draw_top_bar(cr: &Context, screen: &Screen, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let rect = screen.top_bar_rect();
    set_source(cr, colors.bar);
    cr.rectangle(rect.x, rect.y, rect.width, rect.height);
    cr.fill()?;

    let center = rect.center();
    set_source(cr, colors.bar_icon);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(17.0);
    if let Ok(ext) = cr.text_extents(TITLE) {
        cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
        cr.show_text(TITLE)?;
    }
    Ok(())
}

fn draw_grid(
    cr: &Context,
    screen: &Screen,
    colors: &ThemeColors,
    thumbnail: Option<&Pixbuf>,
) -> Result<(), cairo::Error> {
    let viewport = screen.viewport();
    cr.save()?;
    cr.rectangle(
        0.0,
        TOP_BAR_HEIGHT,
        viewport.width,
        viewport.height - TOP_BAR_HEIGHT - BAR_HEIGHT,
    );
    cr.clip();
    for (i, (card, rect)) in screen.cards.iter().zip(screen.card_rects()).enumerate() {
        CardRenderer::new(card, rect, i, thumbnail).draw(cr, colors)?;
    }
    cr.restore()
}

fn draw_panel(
    cr: &Context,
    screen: &Screen,
    colors: &ThemeColors,
    frame: &Frame,
) -> Result<(), cairo::Error> {
    let rect = screen.panel_rect();

    cr.save()?;
    cr.rectangle(rect.x, rect.y, rect.width, rect.height);
    cr.clip();
    cr.translate(0.0, frame.panel_offset);

    // Opaque at the bottom edge, fading out toward the top of the panel.
    let (sr, sg, sb, _) = colors.sheet.into_components();
    let gradient = LinearGradient::new(0.0, rect.y, 0.0, rect.y + rect.height);
    gradient.add_color_stop_rgba(0.01, sr, sg, sb, 0.005);
    gradient.add_color_stop_rgba(0.1, sr, sg, sb, 0.3);
    gradient.add_color_stop_rgba(0.5, sr, sg, sb, 1.0);
    gradient.add_color_stop_rgba(1.0, sr, sg, sb, 1.0);
    cr.set_source(&gradient)?;
    cr.rectangle(rect.x, rect.y, rect.width, rect.height);
    cr.fill()?;

    let count = screen.actions.len().max(1);
    let row_center_y = rect.y + rect.height / 2.0;
    for (i, button) in screen.actions.iter().enumerate() {
        let x = rect.width * (2 * i + 1) as f64 / (2 * count) as f64;
        let offset = frame.button_offsets.get(i).copied().unwrap_or(0.0);

        cr.save()?;
        cr.translate(0.0, offset);

        let disc = Point::new(x, row_center_y - 12.0);
        set_source(cr, colors.action_disc);
        cr.arc(disc.x, disc.y, ACTION_DISC_RADIUS, 0.0, 2.0 * PI);
        cr.fill()?;
        draw_glyph(cr, button.glyph, disc, ACTION_ICON_SIZE, colors.action_icon)?;

        let caption = button.label.to_uppercase();
        set_source(cr, colors.action_label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(11.0);
        if let Ok(ext) = cr.text_extents(&caption) {
            cr.move_to(x - ext.width() / 2.0, disc.y + ACTION_DISC_RADIUS + 18.0);
            cr.show_text(&caption)?;
        }
        cr.restore()?;
    }
    cr.restore()
}

fn draw_bar(
    cr: &Context,
    screen: &Screen,
    colors: &ThemeColors,
    frame: &Frame,
) -> Result<(), cairo::Error> {
    let rect = screen.bar_rect();
    set_source(cr, colors.bar);
    cr.rectangle(rect.x, rect.y, rect.width, rect.height);
    cr.fill()?;

    let xs = screen.bar_slot_xs();
    let y = rect.y + rect.height / 2.0;
    let statics = [
        (xs[0], Glyph::Location),
        (xs[1], Glyph::Email),
        (xs[3], Glyph::Bell),
        (xs[4], Glyph::Person),
    ];
    for (x, glyph) in statics {
        draw_glyph(cr, glyph, Point::new(x, y), BAR_ICON_SIZE, colors.bar_icon)?;
    }

    draw_toggle(cr, screen.toggle_center(), frame)
}

fn draw_toggle(cr: &Context, center: Point, frame: &Frame) -> Result<(), cairo::Error> {
    set_source(cr, frame.toggle_bg);
    cr.arc(center.x, center.y, TOGGLE_RADIUS, 0.0, 2.0 * PI);
    cr.fill()?;

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(frame.rotation_deg.to_radians());
    draw_glyph(
        cr,
        Glyph::Plus,
        Point::default(),
        TOGGLE_ICON_SIZE,
        frame.toggle_fg,
    )?;
    cr.restore()
}

/// Stroked vector glyphs; `size` is the bounding box side length.
fn draw_glyph(
    cr: &Context,
    glyph: Glyph,
    center: Point,
    size: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let half = size / 2.0;
    let (x, y) = (center.x, center.y);

    cr.save()?;
    set_source(cr, color);
    cr.set_line_width((size * 0.1).max(1.5));
    cr.set_line_cap(cairo::LineCap::Round);

    match glyph {
        Glyph::Plus => {
            cr.move_to(x - half * 0.7, y);
            cr.line_to(x + half * 0.7, y);
            cr.move_to(x, y - half * 0.7);
            cr.line_to(x, y + half * 0.7);
            cr.stroke()?;
        }
        Glyph::List => {
            for i in 0..3 {
                let ly = y + (i as f64 - 1.0) * half * 0.55;
                cr.move_to(x - half * 0.6, ly);
                cr.line_to(x + half * 0.6, ly);
            }
            cr.stroke()?;
        }
        Glyph::Person => {
            cr.arc(x, y - half * 0.35, half * 0.3, 0.0, 2.0 * PI);
            cr.stroke()?;
            cr.arc(x, y + half * 0.75, half * 0.65, 1.15 * PI, 1.85 * PI);
            cr.stroke()?;
        }
        Glyph::Location => {
            cr.arc(x, y - half * 0.25, half * 0.45, 0.8 * PI, 2.2 * PI);
            cr.line_to(x, y + half * 0.85);
            cr.close_path();
            cr.stroke()?;
            cr.arc(x, y - half * 0.25, half * 0.15, 0.0, 2.0 * PI);
            cr.stroke()?;
        }
        Glyph::Email => {
            let (w, h) = (half * 0.8, half * 0.55);
            cr.rectangle(x - w, y - h, w * 2.0, h * 2.0);
            cr.stroke()?;
            cr.move_to(x - w, y - h);
            cr.line_to(x, y + h * 0.2);
            cr.line_to(x + w, y - h);
            cr.stroke()?;
        }
        Glyph::Bell => {
            cr.arc(x, y - half * 0.1, half * 0.55, PI, 2.0 * PI);
            cr.line_to(x + half * 0.55, y + half * 0.4);
            cr.line_to(x - half * 0.55, y + half * 0.4);
            cr.close_path();
            cr.stroke()?;
            cr.arc(x, y + half * 0.65, half * 0.12, 0.0, 2.0 * PI);
            cr.fill()?;
        }
    }
    cr.restore()
}
