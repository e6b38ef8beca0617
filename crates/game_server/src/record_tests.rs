use super::*;
use chess_core::Move;

fn seated() -> GameRecord {
    let mut r = GameRecord::new(1, "casual");
    r.seat(Color::White, "alice");
    r.seat(Color::Black, "bob");
    r
}

#[test]
fn roles_follow_seats() {
    let r = seated();
    assert_eq!(r.role_of("alice"), Role::White);
    assert_eq!(r.role_of("bob"), Role::Black);
    assert_eq!(r.role_of("carol"), Role::Observer);
    assert_eq!(r.name_of(Color::Black), "bob");
}

#[test]
fn same_user_in_both_seats() {
    let mut r = seated();
    r.seat(Color::Black, "alice");
    assert_eq!(r.seats_of("alice"), vec![Color::White, Color::Black]);
    assert_eq!(r.role_of("alice"), Role::White);
}

#[test]
fn empty_seat_ends_the_game() {
    let mut r = seated();
    assert_eq!(r.outcome(), None);
    r.vacate(Color::Black);
    assert_eq!(r.outcome(), Some(Outcome::Abandoned(Color::Black)));
    assert_eq!(r.name_of(Color::Black), "BLACK");
}

#[test]
fn checkmate_ends_the_game() {
    let mut r = seated();
    for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        r.game.make_move(m.parse::<Move>().unwrap()).unwrap();
    }
    assert_eq!(r.outcome(), Some(Outcome::Checkmate(Color::White)));
    assert!(r.is_over());
}

#[test]
fn stalemate_ends_the_game() {
    let mut r = seated();
    r.game = chess_core::ChessGame::from_fen("7k/5K2/8/6Q1/8/8/8/8 w").unwrap();
    assert_eq!(r.outcome(), None);
    r.game.make_move("g5g6".parse::<Move>().unwrap()).unwrap();
    assert_eq!(r.outcome(), Some(Outcome::Stalemate(Color::Black)));
    assert!(r.is_over());
}

#[test]
fn json_field_names() {
    let json = serde_json::to_value(seated()).unwrap();
    assert_eq!(json["gameID"], 1);
    assert_eq!(json["whiteUsername"], "alice");
    assert_eq!(json["gameName"], "casual");
    assert_eq!(json["game"]["turn"], "WHITE");
}
