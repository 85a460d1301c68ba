//! # Demo Table Scene
//!
//! A small self-running table used by the `tienlen-table` binary to
//! exercise the renderer: the viewer plays cards with the mouse, bots answer
//! with their lowest card, and every draw routine and animation kind shows
//! up at some point.
//!
//! The scene does not enforce Tien Len rules. It only fakes the state
//! records a real game server would send and feeds them through
//! [`GameSnapshot::from_loose_json`].

use crate::config::{PLAYER_CARD_HEIGHT, TABLE_CARD_HEIGHT, TABLE_CARD_WIDTH, VIEWER_INDEX};
use crate::rendering::{
    hit_test, palette, CardRect, CardRenderer, HandLayout, MacroquadSurface, PlayAreaLayout,
};
use crate::utils::{Clock, SystemClock};
use crate::{
    is_three_of_spades, sort_for_display, standard_deck, Animation, AutoWin, Card, GameSnapshot,
    RenderConfig, RenderResult, VIEWER_LABEL,
};
use log::{debug, info};
use macroquad::color::WHITE;
use macroquad::input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton};
use macroquad::text::draw_text;
use macroquad::window::{clear_background, next_frame, screen_height, screen_width};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::json;

/// Cards dealt to every seat.
pub const HAND_SIZE: usize = 13;

/// Pause between bot moves, in milliseconds.
const BOT_THINK_MS: f64 = 900.0;

/// Stagger between dealt cards, in milliseconds.
const DEAL_STAGGER_MS: f64 = 60.0;

/// Most messages kept in the log.
const MAX_MESSAGES: usize = 6;

/// Represents the current scene of the demo table
#[derive(Debug, Clone, PartialEq)]
pub enum SceneType {
    /// Cards are being played
    Playing,
    /// Someone won outright; waiting for a new deal
    AutoWin(AutoWin),
}

/// Demo table driving a [`CardRenderer`] from macroquad input.
pub struct TableScene {
    scene: SceneType,
    renderer: CardRenderer<SystemClock>,
    surface: MacroquadSurface,
    rng: StdRng,
    bots: usize,
    hands: Vec<Vec<Card>>,
    play_area: Vec<Card>,
    selected: Vec<usize>,
    hand_rects: Vec<CardRect>,
    animations: Vec<Animation>,
    snapshot: GameSnapshot,
    round_number: u32,
    current_seat: usize,
    three_spades_player: Option<usize>,
    opening_played: bool,
    next_bot_move_ms: f64,
    messages: Vec<String>,
}

impl TableScene {
    /// Creates a table with `bots` opponents and deals the first round.
    pub fn new(config: RenderConfig, bots: usize, seed: u64) -> Self {
        let bots = bots.clamp(1, 3);
        let mut scene = Self {
            scene: SceneType::Playing,
            renderer: CardRenderer::new(config),
            surface: MacroquadSurface::new(),
            rng: StdRng::seed_from_u64(seed),
            bots,
            hands: Vec::new(),
            play_area: Vec::new(),
            selected: Vec::new(),
            hand_rects: Vec::new(),
            animations: Vec::new(),
            snapshot: GameSnapshot::default(),
            round_number: 1,
            current_seat: VIEWER_INDEX,
            three_spades_player: None,
            opening_played: false,
            next_bot_move_ms: 0.0,
            messages: Vec::new(),
        };
        scene.deal();
        scene
    }

    /// Runs the scene loop until the viewer quits
    pub async fn run(&mut self) -> RenderResult<()> {
        loop {
            if self.update() {
                break;
            }
            self.draw();
            next_frame().await;
        }
        info!("Table closed after {} rounds", self.round_number);
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.renderer.clock().now_ms()
    }

    fn seats(&self) -> usize {
        self.bots + 1
    }

    fn add_message(&mut self, message: String) {
        debug!("{}", message);
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Shuffles and deals a new round.
    fn deal(&mut self) {
        let mut deck = standard_deck();
        deck.shuffle(&mut self.rng);

        self.hands = (0..self.seats()).map(|_| Vec::with_capacity(HAND_SIZE)).collect();
        let seats = self.seats();
        for (i, card) in deck.into_iter().take(HAND_SIZE * seats).enumerate() {
            self.hands[i % seats].push(card);
        }
        for hand in &mut self.hands {
            sort_for_display(hand);
        }

        self.play_area.clear();
        self.selected.clear();
        self.three_spades_player = self
            .hands
            .iter()
            .position(|hand| hand.iter().any(|card| is_three_of_spades(Some(card))));
        self.opening_played = self.round_number > 1 || self.three_spades_player.is_none();
        self.current_seat = match self.three_spades_player {
            Some(seat) if self.round_number == 1 => seat,
            _ => VIEWER_INDEX,
        };

        let now = self.now_ms();
        self.next_bot_move_ms = now + BOT_THINK_MS;

        let (width, height) = (screen_width(), screen_height());
        let layout = HandLayout::compute(HAND_SIZE, width, self.renderer.config());
        let from = (width / 2.0 - TABLE_CARD_WIDTH / 2.0, height / 2.0 - TABLE_CARD_HEIGHT / 2.0);
        let hand_y = hand_y(height);
        self.animations = self.hands[VIEWER_INDEX]
            .iter()
            .enumerate()
            .map(|(i, card)| {
                self.renderer.create_deal_animation(
                    *card,
                    from,
                    (layout.card_x(i), hand_y),
                    i as f64 * DEAL_STAGGER_MS,
                )
            })
            .collect();

        self.scene = match self.find_auto_winner() {
            Some(winner) => SceneType::AutoWin(winner),
            None => SceneType::Playing,
        };
        self.sync_state();
        self.add_message(format!("Round {} dealt", self.round_number));
    }

    /// Four twos win the round on the spot.
    fn find_auto_winner(&self) -> Option<AutoWin> {
        self.hands.iter().enumerate().find_map(|(seat, hand)| {
            let twos = hand.iter().filter(|card| card.rank() == 2).count();
            (twos == 4).then(|| AutoWin {
                player_index: Some(seat),
                player_name: seat_name(seat),
                reason: "Four 2s".to_string(),
            })
        })
    }

    /// Pushes a freshly built state record through the snapshot adapter.
    fn sync_state(&mut self) {
        let auto_winner = match &self.scene {
            SceneType::AutoWin(winner) => json!({
                "playerIndex": winner.player_index,
                "playerName": winner.player_name,
                "reason": winner.reason,
            }),
            SceneType::Playing => serde_json::Value::Null,
        };
        let record = json!({
            "gameInfo": {
                "round": self.round_number,
                "currentPlayer": seat_name(self.current_seat),
            },
            "rulesInfo": {
                "requiresThreeSpades": !self.opening_played,
                "threeSpadesPlayer": self.three_spades_player,
            },
            "currentPlayerIndex": self.current_seat,
            "autoWinner": auto_winner,
        });
        self.snapshot = GameSnapshot::from_loose_json(&record);
        self.renderer.update_game_state(&self.snapshot);
    }

    fn is_dealing(&self) -> bool {
        self.animations.iter().any(|a| matches!(a, Animation::Deal(_)))
    }

    /// Handles input and bot turns; returns true when exit is requested.
    fn update(&mut self) -> bool {
        if is_key_pressed(KeyCode::Escape) {
            return true;
        }
        self.renderer.update_animations(&mut self.animations);

        if let SceneType::AutoWin(_) = self.scene {
            if is_key_pressed(KeyCode::N) || is_mouse_button_pressed(MouseButton::Left) {
                self.round_number += 1;
                self.deal();
            }
            return false;
        }

        if self.is_dealing() {
            return false;
        }

        if self.current_seat == VIEWER_INDEX {
            self.update_viewer_turn();
        } else if self.now_ms() >= self.next_bot_move_ms {
            self.play_bot_turn();
        }

        if is_key_pressed(KeyCode::F) {
            if let Some(card) = self.play_area.last().copied() {
                let (x, y) = self.play_area_origin(self.play_area.len() - 1);
                let flip = self.renderer.create_card_flip_animation(card, x, y);
                self.animations.push(flip);
            }
        }

        false
    }

    fn update_viewer_turn(&mut self) {
        let (mx, my) = mouse_position();
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(index) = hit_test(&self.hand_rects, &self.selected, mx, my) {
                match self.selected.iter().position(|&i| i == index) {
                    Some(at) => {
                        self.selected.remove(at);
                    }
                    None => self.selected.push(index),
                }
            }
        }

        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
            self.play_selected();
        } else if is_key_pressed(KeyCode::P) {
            self.add_message("You pass".to_string());
            self.advance_turn();
        }
    }

    fn play_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let hand = &self.hands[VIEWER_INDEX];
        let played: Vec<Card> = self.selected.iter().filter_map(|&i| hand.get(i).copied()).collect();

        if !self.opening_played && !played.iter().any(|card| is_three_of_spades(Some(card))) {
            self.add_message("The opening play must include 3♠".to_string());
            return;
        }

        let mut selected = std::mem::take(&mut self.selected);
        selected.sort_unstable_by(|a, b| b.cmp(a));
        for index in selected {
            if index < self.hands[VIEWER_INDEX].len() {
                self.hands[VIEWER_INDEX].remove(index);
            }
        }
        self.put_on_table(VIEWER_INDEX, played);
    }

    fn play_bot_turn(&mut self) {
        let seat = self.current_seat;
        let card = if self.opening_played {
            self.hands[seat].first().copied()
        } else {
            self.hands[seat].iter().copied().find(|card| is_three_of_spades(Some(card)))
        };
        let Some(card) = card else {
            self.advance_turn();
            return;
        };
        self.hands[seat].retain(|c| *c != card);

        let from = bot_origin(seat, screen_width());
        let to = self.play_area_origin(0);
        let animation = self.renderer.create_bot_play_animation(seat, card, from, to);
        self.animations.push(animation);
        self.put_on_table(seat, vec![card]);
    }

    fn put_on_table(&mut self, seat: usize, mut cards: Vec<Card>) {
        sort_for_display(&mut cards);
        let labels: Vec<String> = cards.iter().map(Card::to_string).collect();
        self.add_message(format!("{} played {}", seat_name(seat), labels.join(" ")));

        self.play_area = cards;
        if let Some(position) = self.play_area.iter().position(|c| is_three_of_spades(Some(c))) {
            if !self.opening_played {
                let (x, y) = self.play_area_origin(position);
                let animation = self
                    .renderer
                    .create_three_spades_animation(self.play_area[position], x, y);
                self.animations.push(animation);
            }
        }
        self.opening_played = true;

        if self.hands[seat].is_empty() {
            self.add_message(format!("{} is out of cards", seat_name(seat)));
            self.round_number += 1;
            self.deal();
            return;
        }
        self.advance_turn();
    }

    fn advance_turn(&mut self) {
        self.current_seat = (self.current_seat + 1) % self.seats();
        self.next_bot_move_ms = self.now_ms() + BOT_THINK_MS;
        self.sync_state();
    }

    /// Top-left corner of a card in the play area.
    fn play_area_origin(&self, position: usize) -> (f32, f32) {
        let (width, height) = (screen_width(), screen_height());
        let layout = PlayAreaLayout::compute(
            self.play_area.len().max(1),
            width / 2.0,
            play_area_center_y(height),
            width,
            self.renderer.config(),
        );
        (layout.card_x(position), layout.top_y)
    }

    /// Renders the current scene
    fn draw(&mut self) {
        clear_background(palette::FELT_GREEN);
        self.surface.begin_frame();
        let (width, height) = (self.surface.width(), self.surface.height());

        let dealing = self.is_dealing();
        let renderer = &self.renderer;
        let surface = &mut self.surface;

        for seat in 1..=self.bots {
            let (x, y) = bot_origin(seat, width);
            renderer.draw_bot_hand(
                surface,
                self.hands[seat].len(),
                x,
                y,
                seat == self.current_seat,
                width,
                seat,
            );
        }

        renderer.draw_play_area(surface, &self.play_area, width / 2.0, play_area_center_y(height), width);

        if dealing {
            self.hand_rects.clear();
        } else {
            let (mx, my) = mouse_position();
            let hovered = hit_test(&self.hand_rects, &self.selected, mx, my);
            self.hand_rects = renderer.draw_hand(
                surface,
                &self.hands[VIEWER_INDEX],
                hand_y(height),
                &self.selected,
                hovered,
                width,
            );
        }

        if let Some(first) = self.hand_rects.first() {
            renderer.draw_selected_indicator(surface, self.selected.len(), first.x - 20.0, first.y + 20.0);
        }

        renderer.draw_game_info(surface, &self.snapshot, 16.0, height * 0.42);
        renderer.draw_bot_animations(surface, &self.animations);

        if let SceneType::AutoWin(winner) = &self.scene {
            renderer.draw_automatic_win_indicator(surface, &winner.player_name, &winner.reason, width, height);
        }

        for (i, message) in self.messages.iter().enumerate() {
            draw_text(message, 16.0, height * 0.42 + 110.0 + i as f32 * 18.0, 16.0, WHITE);
        }
    }
}

fn seat_name(seat: usize) -> String {
    if seat == VIEWER_INDEX {
        VIEWER_LABEL.to_string()
    } else {
        format!("Bot {}", seat)
    }
}

fn hand_y(height: f32) -> f32 {
    height - PLAYER_CARD_HEIGHT - 40.0
}

fn play_area_center_y(height: f32) -> f32 {
    height * 0.45
}

/// Top-left corner of a bot's row of backs.
fn bot_origin(seat: usize, width: f32) -> (f32, f32) {
    let column = width / 3.0;
    (20.0 + (seat - 1) as f32 * column, 40.0)
}
