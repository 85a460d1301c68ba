//! Integration test to ensure a renderer can be set up and draw a full table.

use serde_json::json;
use tienlen_render::{
    standard_deck, Card, CardRenderer, GameSnapshot, ManualClock, RecordingSurface, RenderConfig,
    RenderResult, Suit, Surface,
};

fn full_table(renderer: &CardRenderer<ManualClock>, surface: &mut dyn Surface) {
    let deck = standard_deck();
    let hand: Vec<Card> = deck.iter().take(13).copied().collect();

    for seat in 1..=3 {
        renderer.draw_bot_hand(surface, 13, 20.0 + seat as f32 * 300.0, 40.0, seat == 1, 1280.0, seat);
    }
    renderer.draw_play_area(surface, &deck[20..23], 640.0, 360.0, 1280.0);
    let rects = renderer.draw_hand(surface, &hand, 660.0, &[2, 5], Some(7), 1280.0);
    renderer.draw_selected_indicator(surface, 2, rects[0].x - 20.0, rects[0].y + 20.0);
}

#[test]
fn test_basic_startup() -> RenderResult<()> {
    let config = RenderConfig::from_json_str("{}")?;
    let mut renderer = CardRenderer::with_clock(config, ManualClock::new(0.0));

    let snapshot = GameSnapshot::from_json_str(
        r#"{
            "gameInfo": { "round": 1, "currentPlayer": "You" },
            "rulesInfo": { "requiresThreeSpades": true, "threeSpadesPlayer": 0 },
            "currentPlayerIndex": 0
        }"#,
    )?;
    renderer.update_game_state(&snapshot);

    let mut surface = RecordingSurface::new();
    full_table(&renderer, &mut surface);
    renderer.draw_game_info(&mut surface, &snapshot, 16.0, 300.0);

    assert!(surface.is_balanced());
    assert!(surface.texts().contains(&"First play must include 3♠"));
    assert!(surface.texts().contains(&"Bot 3"));
    Ok(())
}

#[test]
fn test_three_spades_scenario() -> RenderResult<()> {
    let mut renderer = CardRenderer::with_clock(RenderConfig::default(), ManualClock::new(0.0));
    let three = Card::new(3, Suit::Spades)?;

    renderer.update_game_state(&GameSnapshot::from_loose_json(&json!({
        "round_number": 1,
        "rules_info": { "requires_three_spades": true },
        "current_player_index": 0,
    })));
    assert!(renderer.should_highlight_three_spades(Some(&three), true));
    assert!(renderer.should_highlight_three_spades(Some(&three), false));

    renderer.update_game_state(&GameSnapshot::from_loose_json(&json!({
        "round_number": 1,
        "rules_info": { "requires_three_spades": true },
        "current_player_index": 1,
    })));
    assert!(!renderer.should_highlight_three_spades(Some(&three), true));
    assert!(renderer.should_highlight_three_spades(Some(&three), false));
    assert!(!renderer.should_highlight_three_spades(None, false));
    Ok(())
}

#[test]
fn test_auto_win_round_trip() -> RenderResult<()> {
    let mut renderer = CardRenderer::with_clock(RenderConfig::default(), ManualClock::new(0.0));
    let snapshot = GameSnapshot::from_loose_json(&json!({
        "round_number": 3,
        "autoWinner": { "playerName": "Bot 2", "reason": "Six pairs" },
    }));
    renderer.update_game_state(&snapshot);

    let winner = renderer
        .game_state()
        .auto_winner
        .clone()
        .expect("auto winner mirrored");
    let mut surface = RecordingSurface::new();
    renderer.draw_automatic_win_indicator(&mut surface, &winner.player_name, &winner.reason, 1280.0, 720.0);

    assert_eq!(surface.texts(), vec!["AUTOMATIC WIN!", "Bot 2 wins", "Six pairs"]);
    Ok(())
}

#[test]
fn test_card_json_rejects_bad_input() {
    assert!(serde_json::from_str::<Card>(r#"{ "rank": 15, "suit": "♥" }"#).is_ok());
    assert!(serde_json::from_str::<Card>(r#"{ "rank": 1, "suit": "♥" }"#).is_err());
    assert!(serde_json::from_str::<Card>(r#"{ "rank": 7, "suit": "stars" }"#).is_err());
}
