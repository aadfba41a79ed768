use super::{
    BAR_HEIGHT, CARD_HEIGHT, GRID_PADDING, OPEN_ROTATION_DEG, PANEL_HEIGHT, TOGGLE_RADIUS,
    TOP_BAR_HEIGHT,
};
use crate::anim::Tween;
use crate::config::{ActionLabel, Config, Glyph, MotionConfig};
use crate::gui::geometry::{Point, Rect, Size};
use crate::gui::theme::ThemeColors;
use palette::Srgba;
use rand::Rng;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Card {
    pub color: Srgba<f64>,
}

impl Card {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            color: Srgba::new(
                rng.gen_range(0..256u16) as f64 / 255.0,
                rng.gen_range(0..256u16) as f64 / 255.0,
                rng.gen_range(0..256u16) as f64 / 255.0,
                1.0,
            ),
        }
    }
}

pub struct ActionButton {
    pub label: ActionLabel,
    pub glyph: Glyph,
    /// Extra entrance offset, nested inside the panel's own slide.
    slide: Tween<f64>,
    start_offset: f64,
}

/// Everything the renderer needs for one frame, sampled from the tweens.
#[derive(Debug, Clone)]
pub struct Frame {
    pub panel_offset: f64,
    pub panel_visible: bool,
    pub button_offsets: Vec<f64>,
    pub toggle_bg: Srgba<f64>,
    pub toggle_fg: Srgba<f64>,
    pub rotation_deg: f64,
}

/// The whole screen's state: one boolean of intent plus the tweens that
/// chase it. Children get sampled values; intents arrive through
/// [`Screen::toggle`] and [`Screen::set_open`].
pub struct Screen {
    menu_open: bool,
    pub cards: Vec<Card>,
    pub actions: Vec<ActionButton>,
    viewport: Size,
    columns: usize,
    motion: MotionConfig,
    theme: ThemeColors,
    panel: Tween<f64>,
    toggle_bg: Tween<Srgba<f64>>,
    toggle_fg: Tween<Srgba<f64>>,
    rotation: Tween<f64>,
}

impl Screen {
    pub fn new(config: &Config, theme: ThemeColors, now: Instant) -> Self {
        let mut rng = rand::thread_rng();
        let cards = (0..config.grid.cards)
            .map(|_| Card::random(&mut rng))
            .collect();

        let motion = config.motion.clone();
        let (duration, ease) = (motion.duration, motion.ease);

        Self {
            menu_open: false,
            cards,
            actions: Self::init_actions(config, now),
            viewport: Size::new(412.0, 892.0),
            columns: config.grid.columns.max(1),
            panel: Tween::settled(motion.panel_offset, duration, ease, now),
            toggle_bg: Tween::settled(theme.toggle_closed_bg, duration, ease, now),
            toggle_fg: Tween::settled(theme.icon_closed, duration, ease, now),
            rotation: Tween::settled(0.0, duration, ease, now),
            motion,
            theme,
        }
    }

    fn init_actions(config: &Config, now: Instant) -> Vec<ActionButton> {
        let motion = &config.motion;
        config
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let start_offset = stagger_offset(motion, i);
                ActionButton {
                    label: action.label.clone(),
                    glyph: action.glyph,
                    slide: Tween::settled(start_offset, motion.duration, motion.ease, now),
                    start_offset,
                }
            })
            .collect()
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle(&mut self, now: Instant) {
        self.set_open(!self.menu_open, now);
    }

    /// Flips the flag and retargets every channel. Mid-transition flips
    /// continue from the currently sampled values; setting the flag to its
    /// current value changes nothing.
    pub fn set_open(&mut self, open: bool, now: Instant) {
        self.menu_open = open;
        self.retarget_all(now);
    }

    fn retarget_all(&mut self, now: Instant) {
        let open = self.menu_open;
        self.panel.retarget(
            if open { 0.0 } else { self.motion.panel_offset },
            now,
        );
        for button in &mut self.actions {
            button
                .slide
                .retarget(if open { 0.0 } else { button.start_offset }, now);
        }
        self.toggle_bg.retarget(
            if open {
                self.theme.toggle_open_bg
            } else {
                self.theme.toggle_closed_bg
            },
            now,
        );
        self.toggle_fg.retarget(
            if open {
                self.theme.icon_open
            } else {
                self.theme.icon_closed
            },
            now,
        );
        self.rotation
            .retarget(if open { OPEN_ROTATION_DEG } else { 0.0 }, now);
    }

    /// Swap in a reloaded config without disturbing the open/closed intent.
    /// Cards are only re-randomized when the count changes, and action
    /// tweens are kept in place unless the button list itself changed, so a
    /// reload never replays an entrance.
    pub fn apply_config(&mut self, config: &Config, now: Instant) {
        let at_rest = !self.is_animating(now);

        if config.grid.cards != self.cards.len() {
            let mut rng = rand::thread_rng();
            self.cards = (0..config.grid.cards)
                .map(|_| Card::random(&mut rng))
                .collect();
        }
        self.columns = config.grid.columns.max(1);
        self.motion = config.motion.clone();

        let actions_changed = self.actions.len() != config.actions.len()
            || self
                .actions
                .iter()
                .zip(&config.actions)
                .any(|(b, a)| b.label != a.label || b.glyph != a.glyph);
        if actions_changed {
            self.actions = Self::init_actions(config, now);
        } else {
            for (i, button) in self.actions.iter_mut().enumerate() {
                button.start_offset = stagger_offset(&self.motion, i);
                button
                    .slide
                    .reconfigure(self.motion.duration, self.motion.ease, now);
            }
        }

        self.panel
            .reconfigure(self.motion.duration, self.motion.ease, now);
        self.toggle_bg
            .reconfigure(self.motion.duration, self.motion.ease, now);
        self.toggle_fg
            .reconfigure(self.motion.duration, self.motion.ease, now);
        self.rotation
            .reconfigure(self.motion.duration, self.motion.ease, now);

        // A closed panel at rest follows changed offsets by snapping;
        // retargeting would slide the hidden panel into view.
        if at_rest && !self.menu_open {
            self.panel.snap(self.motion.panel_offset, now);
            for button in &mut self.actions {
                button.slide.snap(button.start_offset, now);
            }
        }
        self.retarget_all(now);
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.panel.is_settled(now)
            || !self.toggle_bg.is_settled(now)
            || !self.toggle_fg.is_settled(now)
            || !self.rotation.is_settled(now)
            || self.actions.iter().any(|b| !b.slide.is_settled(now))
    }

    pub fn frame(&self, now: Instant) -> Frame {
        let panel_settled =
            self.panel.is_settled(now) && self.actions.iter().all(|b| b.slide.is_settled(now));
        Frame {
            panel_offset: self.panel.sample(now),
            // The panel is absent once fully closed and settled.
            panel_visible: self.menu_open || !panel_settled,
            button_offsets: self.actions.iter().map(|b| b.slide.sample(now)).collect(),
            toggle_bg: self.toggle_bg.sample(now),
            toggle_fg: self.toggle_fg.sample(now),
            rotation_deg: self.rotation.sample(now),
        }
    }

    // --- layout ---

    pub fn top_bar_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, TOP_BAR_HEIGHT)
    }

    pub fn bar_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.viewport.height - BAR_HEIGHT,
            self.viewport.width,
            BAR_HEIGHT,
        )
    }

    /// Resting position of the action panel, anchored just above the bottom
    /// edge. The frame's `panel_offset` shifts it downward while sliding.
    pub fn panel_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.viewport.height - PANEL_HEIGHT,
            self.viewport.width,
            PANEL_HEIGHT,
        )
    }

    /// Horizontal centers of the five equal bottom-bar slots.
    pub fn bar_slot_xs(&self) -> [f64; 5] {
        std::array::from_fn(|i| self.viewport.width * (2 * i + 1) as f64 / 10.0)
    }

    pub fn toggle_center(&self) -> Point {
        Point::new(
            self.viewport.width / 2.0,
            self.viewport.height - BAR_HEIGHT / 2.0,
        )
    }

    pub fn toggle_hit(&self, p: Point) -> bool {
        p.distance_to(self.toggle_center()) <= TOGGLE_RADIUS
    }

    /// Fixed-height cells, `columns` per row, filling the area between the
    /// title bar and the bottom bar.
    pub fn card_rects(&self) -> Vec<Rect> {
        let cols = self.columns;
        let width = (self.viewport.width - 2.0 * GRID_PADDING) / cols as f64;
        self.cards
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let (row, col) = (i / cols, i % cols);
                Rect::new(
                    GRID_PADDING + col as f64 * width,
                    TOP_BAR_HEIGHT + GRID_PADDING + row as f64 * CARD_HEIGHT,
                    width,
                    CARD_HEIGHT,
                )
            })
            .collect()
    }
}

fn stagger_offset(motion: &MotionConfig, index: usize) -> f64 {
    let offsets = &motion.stagger_offsets;
    match offsets.get(index) {
        Some(v) => *v,
        // The last entry repeats for any extra buttons.
        None => offsets.last().copied().unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn screen(now: Instant) -> Screen {
        Screen::new(&Config::default(), ThemeColors::default(), now)
    }

    fn second(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    /// Asserts every component of `v` lies between the two endpoint colors.
    fn assert_color_between(v: Srgba<f64>, a: Srgba<f64>, b: Srgba<f64>) {
        let channels = [
            ("red", v.red, a.red, b.red),
            ("green", v.green, a.green, b.green),
            ("blue", v.blue, a.blue, b.blue),
            ("alpha", v.alpha, a.alpha, b.alpha),
        ];
        for (name, value, x, y) in channels {
            let (lo, hi) = (x.min(y), x.max(y));
            assert!(
                (lo..=hi).contains(&value),
                "{name} channel out of bounds: {value} not in [{lo}, {hi}]"
            );
        }
    }

    #[test]
    fn cold_start_matches_closed_steady_state() {
        let now = Instant::now();
        let s = screen(now);
        let theme = ThemeColors::default();

        assert!(!s.menu_open());
        assert!(!s.is_animating(now));

        let frame = s.frame(now);
        assert!(!frame.panel_visible);
        assert_eq!(frame.toggle_bg, theme.toggle_closed_bg);
        assert_eq!(frame.toggle_fg, theme.icon_closed);
        assert_eq!(frame.rotation_deg, 0.0);
    }

    #[test]
    fn single_tap_settles_open() {
        let now = Instant::now();
        let mut s = screen(now);
        s.toggle(now);
        assert!(s.menu_open());
        assert!(s.is_animating(now + Duration::from_millis(500)));

        let done = now + second(1);
        let theme = ThemeColors::default();
        let frame = s.frame(done);
        assert!(!s.is_animating(done));
        assert!(frame.panel_visible);
        assert_eq!(frame.panel_offset, 0.0);
        assert_eq!(frame.button_offsets, vec![0.0, 0.0, 0.0]);
        assert_eq!(frame.toggle_bg, theme.toggle_open_bg);
        assert_eq!(frame.toggle_fg, theme.icon_open);
        assert_eq!(frame.rotation_deg, OPEN_ROTATION_DEG);
    }

    #[test]
    fn tap_parity_decides_the_steady_state() {
        let now = Instant::now();
        let mut s = screen(now);
        // Seven rapid taps, 100ms apart, all inside one transition window.
        for i in 0..7 {
            s.toggle(now + Duration::from_millis(100 * i));
        }
        assert!(s.menu_open());
        let settled = now + second(3);
        assert!(!s.is_animating(settled));
        assert!(s.frame(settled).panel_visible);

        s.toggle(settled);
        assert!(!s.menu_open());
        let frame = s.frame(settled + second(1));
        assert!(!frame.panel_visible);
        assert_eq!(frame.rotation_deg, 0.0);
    }

    #[test]
    fn double_tap_returns_without_overshoot() {
        let now = Instant::now();
        let mut s = screen(now);
        s.toggle(now);
        let second_tap = now + Duration::from_millis(400);
        s.toggle(second_tap);
        assert!(!s.menu_open());

        // No channel may leave its endpoint bounds at any sampled time.
        let theme = ThemeColors::default();
        for ms in (0..=2000).step_by(16) {
            let frame = s.frame(second_tap + Duration::from_millis(ms));
            assert!((0.0..=250.0).contains(&frame.panel_offset));
            for (i, offset) in frame.button_offsets.iter().enumerate() {
                assert!((0.0..=450.0).contains(offset), "button {i}: {offset}");
            }
            assert!((0.0..=OPEN_ROTATION_DEG).contains(&frame.rotation_deg));
            assert_color_between(frame.toggle_bg, theme.toggle_closed_bg, theme.toggle_open_bg);
            assert_color_between(frame.toggle_fg, theme.icon_closed, theme.icon_open);
        }

        let frame = s.frame(second_tap + second(1));
        assert!(!s.is_animating(second_tap + second(1)));
        assert!(!frame.panel_visible);
        assert_eq!(frame.panel_offset, 250.0);
        assert_eq!(frame.rotation_deg, 0.0);
    }

    #[test]
    fn stagger_keeps_left_to_right_settle_order() {
        let now = Instant::now();
        let mut s = screen(now);
        s.toggle(now);

        for ms in (16..1000).step_by(16) {
            let frame = s.frame(now + Duration::from_millis(ms));
            let o = &frame.button_offsets;
            assert!(
                o[0] <= o[1] && o[1] <= o[2],
                "stagger order broken at {ms}ms: {o:?}"
            );
        }
    }

    #[test]
    fn grid_lays_out_ten_cells_in_two_columns() {
        let now = Instant::now();
        let mut s = screen(now);
        s.set_viewport(412.0, 892.0);

        let check = |s: &Screen| {
            let rects = s.card_rects();
            assert_eq!(rects.len(), 10);
            let mut xs: Vec<i64> = rects.iter().map(|r| r.x as i64).collect();
            xs.sort_unstable();
            xs.dedup();
            assert_eq!(xs.len(), 2, "expected exactly two column positions");
            // The grid starts below the title bar.
            assert!(rects.iter().all(|r| r.y >= TOP_BAR_HEIGHT));
        };

        check(&s);
        // Grid content is independent of the menu flag.
        s.toggle(now);
        check(&s);
    }

    #[test]
    fn card_colors_survive_unrelated_reloads() {
        let now = Instant::now();
        let mut s = screen(now);
        let before: Vec<_> = s.cards.iter().map(|c| c.color).collect();

        let mut config = Config::default();
        config.motion.duration = Duration::from_millis(200);
        s.apply_config(&config, now);

        let after: Vec<_> = s.cards.iter().map(|c| c.color).collect();
        assert_eq!(before, after);
        // New duration actually applies.
        s.toggle(now);
        assert!(!s.is_animating(now + Duration::from_millis(250)));
    }

    #[test]
    fn reload_while_open_does_not_replay_entrances() {
        let now = Instant::now();
        let mut s = screen(now);
        s.toggle(now);
        let settled = now + second(2);
        assert!(!s.is_animating(settled));

        let mut config = Config::default();
        config.motion.duration = Duration::from_millis(300);
        s.apply_config(&config, settled);

        assert!(!s.is_animating(settled));
        let frame = s.frame(settled);
        assert!(frame.panel_visible);
        assert_eq!(frame.panel_offset, 0.0);
        assert_eq!(frame.button_offsets, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn reload_while_closed_keeps_the_panel_hidden() {
        let now = Instant::now();
        let mut s = screen(now);

        let mut config = Config::default();
        config.motion.panel_offset = 300.0;
        config.motion.stagger_offsets = vec![60.0, 260.0, 460.0];
        s.apply_config(&config, now);

        assert!(!s.is_animating(now));
        assert!(!s.frame(now).panel_visible);

        // The changed offsets are where the next entrance starts from.
        s.toggle(now);
        let frame = s.frame(now);
        assert_eq!(frame.panel_offset, 300.0);
        assert_eq!(frame.button_offsets, vec![60.0, 260.0, 460.0]);
    }

    #[test]
    fn toggle_hit_testing() {
        let now = Instant::now();
        let mut s = screen(now);
        s.set_viewport(400.0, 800.0);
        let center = s.toggle_center();
        assert!(s.toggle_hit(center));
        assert!(s.toggle_hit(Point::new(center.x + TOGGLE_RADIUS - 1.0, center.y)));
        assert!(!s.toggle_hit(Point::new(center.x + TOGGLE_RADIUS + 1.0, center.y)));
        assert!(!s.toggle_hit(Point::new(10.0, 10.0)));
    }

    #[test]
    fn extra_actions_reuse_the_last_stagger_offset() {
        let mut config = Config::default();
        let mut actions = config.actions.clone();
        actions.push(crate::config::ActionConfig {
            label: "Share".into(),
            glyph: Glyph::Email,
        });
        config.actions = actions;

        let now = Instant::now();
        let s = Screen::new(&config, ThemeColors::default(), now);
        assert_eq!(s.actions.len(), 4);
        assert_eq!(s.actions[3].start_offset, 450.0);
    }
}
