use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::geometry::Point;
use crate::gui::screen::{self, Screen, THUMB_LOAD_SIZE};
use crate::gui::theme::{self, ThemeColors};
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub screen: Rc<RefCell<Screen>>,
    pub thumbnail: Rc<RefCell<Option<Pixbuf>>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Click(Point),
    Toggle,
    SetOpen(bool),
    Resize(f64, f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Open => AppMsg::SetOpen(true),
            AppEvent::Close => AppMsg::SetOpen(false),
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Animate Floating Action Menu"),
            set_default_size: (412, 892),
            add_css_class: "fabmenu-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::SetOpen(false));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fabmenu-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width as f64, height as f64));
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let colors = ThemeColors::default();
        let screen = Rc::new(RefCell::new(Screen::new(
            &config,
            colors.clone(),
            Instant::now(),
        )));
        let thumbnail = Rc::new(RefCell::new(load_thumbnail(&config)));

        let model = AppModel {
            screen: screen.clone(),
            thumbnail: thumbnail.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let screen_draw = screen.clone();
        let thumbnail_draw = thumbnail.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = screen::draw(
                cr,
                &screen_draw.borrow(),
                &colors,
                thumbnail_draw.borrow().as_ref(),
                Instant::now(),
            ) {
                log::error!("Drawing error: {}", e);
            }
        });

        // Keep redrawing on the frame clock while any tween is in flight,
        // plus one extra frame so the settled end state lands on screen.
        let screen_tick = screen.clone();
        let was_animating = Cell::new(false);
        widgets.drawing_area.add_tick_callback(move |area, _| {
            let animating = screen_tick.borrow().is_animating(Instant::now());
            if animating || was_animating.get() {
                area.queue_draw();
            }
            was_animating.set(animating);
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Click(point) => {
                if self.screen.borrow().toggle_hit(point) {
                    self.screen.borrow_mut().toggle(Instant::now());
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Toggle => {
                self.screen.borrow_mut().toggle(Instant::now());
                self.drawing_area.queue_draw();
            }
            AppMsg::SetOpen(open) => {
                self.screen.borrow_mut().set_open(open, Instant::now());
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(width, height) => {
                self.screen.borrow_mut().set_viewport(width, height);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.screen
                        .borrow_mut()
                        .apply_config(&new_config, Instant::now());
                    *self.thumbnail.borrow_mut() = load_thumbnail(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

fn load_thumbnail(config: &Config) -> Option<Pixbuf> {
    let path: &Path = config.grid.thumbnail.as_deref()?;
    match Pixbuf::from_file_at_scale(path, THUMB_LOAD_SIZE, THUMB_LOAD_SIZE, true) {
        Ok(pixbuf) => Some(pixbuf),
        Err(e) => {
            log::debug!("Thumbnail {} unavailable: {}", path.display(), e);
            None
        }
    }
}
