use bitflags::bitflags;
use gloo::timers::callback::Timeout;
use pairmatch_core::*;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::flow::{Backdrop, Flow, Next};
use crate::tile::{BACKGROUND, FLASH, Highlight, TileView};
use crate::utils::js_random_seed;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    Pointer(Option<(Px, Px)>),
    Click(Px, Px),
    Tick,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub(crate) config: GameConfig,
    /// Seed of the first board, later boards are always random
    #[prop_or_default]
    pub(crate) seed: Option<u64>,
}

pub(crate) struct GameView {
    config: GameConfig,
    flow: Flow,
    hold: Option<Timeout>,
}

impl GameView {
    fn deal(config: &GameConfig, seed: u64) -> (Board, PeekSequence) {
        log::debug!("new board, seed: {}", seed);
        let board = RandomBoardGenerator::new(seed).generate(config);
        let peek = PeekSequence::seeded(board.size(), seed.rotate_left(32));
        (board, peek)
    }

    /// Schedules the next tick, holds never overlap so the previous timer is always spent.
    fn schedule(&mut self, ctx: &Context<Self>, next: Next) {
        match next {
            Next::Hold(millis) => {
                let link = ctx.link().clone();
                self.hold = Some(Timeout::new(millis, move || link.send_message(Msg::Tick)));
            }
            Next::Ready => self.hold = None,
            Next::NewGame => {
                self.hold = None;
                self.restart(ctx);
            }
        }
    }

    fn restart(&mut self, ctx: &Context<Self>) {
        let (board, peek) = Self::deal(&self.config, js_random_seed());
        let next = self.flow.restart(board, peek);
        self.schedule(ctx, next);
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { config, seed } = ctx.props().clone();
        let (board, peek) = Self::deal(&config, seed.unwrap_or_else(js_random_seed));
        let (flow, next) = Flow::new(board, peek);
        let mut view = Self {
            config,
            flow,
            hold: None,
        };
        view.schedule(ctx, next);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pointer(pos) => self.flow.pointer_moved(pos),
            Click(px, py) => {
                if self.hold.is_some() {
                    log::trace!("click during {:?} ignored", self.flow.phase());
                    return false;
                }
                let (next, redraw) = self.flow.click(px, py);
                self.schedule(ctx, next);
                redraw
            }
            Tick => {
                self.hold = None;
                let next = self.flow.tick();
                self.schedule(ctx, next);
                true
            }
            NewGame => {
                if self.flow.new_game_allowed() {
                    self.restart(ctx);
                    true
                } else {
                    log::debug!("new game ignored during hold");
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let layout = self.flow.layout();
        let (width, height) = layout.screen_size();
        let background = match self.flow.backdrop() {
            Backdrop::Normal => BACKGROUND,
            Backdrop::Flash => FLASH,
        };
        let style = format!(
            "position: relative; width: {}px; height: {}px; background: {};",
            width, height, background
        );

        let onmousemove = ctx
            .link()
            .callback(|e: MouseEvent| Msg::Pointer(Some((e.offset_x(), e.offset_y()))));
        let onmouseleave = ctx.link().callback(|_: MouseEvent| Msg::Pointer(None));
        let onmousedown = ctx.link().batch_callback(|e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            log::trace!("mouse down ({:?}) at ({}, {})", buttons, e.offset_x(), e.offset_y());
            buttons
                .contains(MouseButtons::LEFT)
                .then(|| Msg::Click(e.offset_x(), e.offset_y()))
        });
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        let highlight = self.flow.highlight().map(|coords| {
            let rect = layout.cell_to_screen_rect(coords);
            html! { <Highlight {rect}/> }
        });

        html! {
            <div class="pairmatch">
                <nav>
                    <button onclick={cb_new_game} disabled={!self.flow.new_game_allowed()}>{"New game"}</button>
                </nav>
                <div class="board" {style} {onmousemove} {onmouseleave} {onmousedown}>
                    {
                        for iter_coords(layout.size()).map(|coords| {
                            let rect = layout.cell_to_screen_rect(coords);
                            let face = self.flow.face_at(coords);
                            html! { <TileView key={format!("{}-{}", coords.0, coords.1)} {rect} {face}/> }
                        })
                    }
                    {highlight}
                </div>
            </div>
        }
    }
}
