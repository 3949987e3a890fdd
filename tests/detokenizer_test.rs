use salsa_tiger::detokenizer::*;
use salsa_tiger::ConversionError;

fn slices(text: &str, spans: &[TokenSpan]) -> Vec<String> {
  let chars: Vec<char> = text.chars().collect();
  spans
    .iter()
    .map(|(start, end)| chars[*start..*end].iter().collect())
    .collect()
}

#[test]
fn simple_sentence() {
  let (text, spans) = sentence_from_tokens(&["Der", "Mann", "."], &["ART", "NN", "$."]).unwrap();
  assert_eq!(text, "Der Mann.");
  assert_eq!(spans, vec![(0, 3), (4, 8), (8, 9)]);
}

#[test]
fn commas_attach_left() {
  let tokens = ["Er", "sagt", ",", "dass", "sie", "kommt", "."];
  let tags = ["PPER", "VVFIN", "$,", "KOUS", "PPER", "VVFIN", "$."];
  let (text, _) = sentence_from_tokens(&tokens, &tags).unwrap();
  assert_eq!(text, "Er sagt, dass sie kommt.");
}

#[test]
fn brackets_quotes_and_slashes() {
  let tokens = ["(", "Bonn", ")", "und", "``", "Köln", "''", "1998", "/", "99", "."];
  let tags = ["$(", "NE", "$(", "KON", "$(", "NE", "$(", "CARD", "$(", "CARD", "$."];
  let (text, spans) = sentence_from_tokens(&tokens, &tags).unwrap();
  assert_eq!(text, "(Bonn) und ``Köln'' 1998/99.");
  assert_eq!(slices(&text, &spans), tokens.to_vec());
}

#[test]
fn spans_count_characters_not_bytes() {
  let (text, spans) =
    sentence_from_tokens(&["Der", "Mann", "schläft", "."], &["ART", "NN", "VVFIN", "$."]).unwrap();
  assert_eq!(text, "Der Mann schläft.");
  assert_eq!(spans, vec![(0, 3), (4, 8), (9, 16), (16, 17)]);
}

#[test]
fn spans_reproduce_tokens() {
  let tokens = ["Die", "Regierung", "(", "CDU", "/", "CSU", ")", "lehnt", "ab", ",", "hieß", "es", "."];
  let tags = ["ART", "NN", "$(", "NE", "$(", "NE", "$(", "VVFIN", "PTKVZ", "$,", "VVFIN", "PPER", "$."];
  let (text, spans) = sentence_from_tokens(&tokens, &tags).unwrap();
  assert_eq!(slices(&text, &spans), tokens.to_vec());
  for pair in spans.windows(2) {
    assert!(pair[0].1 <= pair[1].0, "overlap between {:?} and {:?}", pair[0], pair[1]);
  }
}

#[test]
fn single_token_and_empty_sentences() {
  let (text, spans) = sentence_from_tokens(&["Ja"], &["PTKANT"]).unwrap();
  assert_eq!(text, "Ja");
  assert_eq!(spans, vec![(0, 2)]);
  let empty: [&str; 0] = [];
  let (text, spans) = sentence_from_tokens(&empty, &empty).unwrap();
  assert!(text.is_empty());
  assert!(spans.is_empty());
}

#[test]
fn length_mismatch_is_fatal() {
  match sentence_from_tokens(&["Der", "Mann"], &["ART"]) {
    Err(ConversionError::TokenPosMismatch { tokens, tags }) => {
      assert_eq!(tokens, 2);
      assert_eq!(tags, 1);
    },
    other => panic!("expected a mismatch error, got {:?}", other),
  }
}

#[test]
fn sentences_are_joined_by_one_space() {
  let sentences = vec![
    (vec!["Der", "Mann", "."], vec!["ART", "NN", "$."]),
    (vec!["Er", "schläft", "."], vec!["PPER", "VVFIN", "$."]),
  ];
  let (text, spans) = text_from_tokens(&sentences).unwrap();
  assert_eq!(text, "Der Mann. Er schläft.");
  assert_eq!(spans[0], vec![(0, 3), (4, 8), (8, 9)]);
  assert_eq!(spans[1], vec![(10, 12), (13, 20), (20, 21)]);
  assert_eq!(sentence_span(&spans[0]), Some((0, 9)));
  assert_eq!(sentence_span(&spans[1]), Some((10, 21)));
  assert_eq!(sentence_span(&[]), None);

  let flat: Vec<TokenSpan> = spans.into_iter().flatten().collect();
  let tokens: Vec<&str> = sentences.iter().flat_map(|(t, _)| t.iter().copied()).collect();
  assert_eq!(slices(&text, &flat), tokens);
  for pair in flat.windows(2) {
    assert!(pair[0].0 <= pair[1].0);
    assert!(pair[0].1 <= pair[1].0);
  }
}

#[test]
fn builder_tracks_character_length() {
  let mut builder = TextBuilder::new();
  builder.push_sentence(&["Grüß", "Gott"], &["VVIMP", "NN"]).unwrap();
  assert_eq!(builder.text(), "Grüß Gott");
  assert_eq!(builder.char_len(), 9);
  let spans = builder.push_sentence(&["!"], &["$."]).unwrap();
  assert_eq!(spans, vec![(10, 11)]);
  assert_eq!(builder.into_text(), "Grüß Gott !");
}

#[test]
fn empty_first_sentence_adds_no_separator() {
  let empty: Vec<&str> = Vec::new();
  let sentences = vec![(empty.clone(), empty), (vec!["Ja"], vec!["PTKANT"])];
  let (text, spans) = text_from_tokens(&sentences).unwrap();
  assert_eq!(text, "Ja");
  assert!(spans[0].is_empty());
  assert_eq!(spans[1], vec![(0, 2)]);
}

#[test]
fn empty_sentences_between_or_after_text_add_no_space() {
  let mut builder = TextBuilder::new();
  builder.push_sentence(&["Der", "Mann", "."], &["ART", "NN", "$."]).unwrap();
  let empty: [&str; 0] = [];
  assert!(builder.push_sentence(&empty, &empty).unwrap().is_empty());
  assert_eq!(builder.text(), "Der Mann.");
  assert_eq!(builder.char_len(), 9);
  let spans = builder.push_sentence(&["Ja", "."], &["PTKANT", "$."]).unwrap();
  assert_eq!(spans, vec![(10, 12), (12, 13)]);
  builder.push_sentence(&empty, &empty).unwrap();
  assert_eq!(builder.into_text(), "Der Mann. Ja.");
}
