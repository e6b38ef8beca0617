use super::*;
use chess_core::pos;

#[test]
fn parses_make_move() {
    let text = r#"{"commandType":"MAKE_MOVE","authToken":"t","gameID":3,
        "move":{"startPosition":{"row":2,"col":5},"endPosition":{"row":4,"col":5},"promotionPiece":null}}"#;
    let cmd = Command::parse(text).unwrap();
    assert_eq!(cmd.command_type, CommandType::MakeMove);
    assert_eq!(cmd.game_id, 3);
    assert_eq!(cmd.mv, Some(Move::new(pos("e2"), pos("e4"))));
}

#[test]
fn unknown_command_type_still_parses() {
    let cmd = Command::parse(r#"{"commandType":"DANCE","authToken":"t","gameID":1}"#).unwrap();
    assert_eq!(cmd.command_type, CommandType::Unknown);
    assert_eq!(cmd.mv, None);
}

#[test]
fn garbage_does_not_parse() {
    assert!(Command::parse("not json").is_err());
    assert!(Command::parse(r#"{"commandType":"CONNECT"}"#).is_err());
}

#[test]
fn command_roundtrip_omits_missing_move() {
    let json = serde_json::to_value(Command::connect("t", 9)).unwrap();
    assert_eq!(json["commandType"], "CONNECT");
    assert_eq!(json["gameID"], 9);
    assert!(json.get("move").is_none());
}

#[test]
fn error_text_is_normalized() {
    assert_eq!(normalize_error("game is over"), "Error: game is over");
    assert_eq!(normalize_error("Error: already"), "Error: already");
    assert_eq!(normalize_error(""), "Error: ");
    assert_eq!(normalize_error("é"), "Error: é");
}

#[test]
fn other_casings_still_get_the_marker() {
    for text in ["error: lower", "errors were found", "ERROR!!", "Error without colon"] {
        let out = normalize_error(text);
        assert!(out.starts_with("Error:"), "{text:?} became {out:?}");
        assert_eq!(out, format!("Error: {text}"));
    }
}

#[test]
fn server_message_tags() {
    let json = serde_json::to_value(ServerMessage::error("nope")).unwrap();
    assert_eq!(json["serverMessageType"], "ERROR");
    assert_eq!(json["errorMessage"], "Error: nope");

    let json = serde_json::to_value(ServerMessage::notification("hi")).unwrap();
    assert_eq!(json["serverMessageType"], "NOTIFICATION");
    assert_eq!(json["message"], "hi");

    let json = serde_json::to_value(ServerMessage::load_game(GameRecord::new(1, "g"))).unwrap();
    assert_eq!(json["serverMessageType"], "LOAD_GAME");
    assert_eq!(json["game"]["gameName"], "g");
}
