//! Property tests over the codec and the collection.

use cardlist_core::codec::escape_content;
use cardlist_core::{decode_transfer, encode_transfer, parse_cards, BoardError, Card, CardCollection, NO_LIST};
use proptest::prelude::*;

fn arb_row() -> impl Strategy<Value = (String, i64, String, i64)> {
    (
        "[A-Za-z0-9 ]{0,12}",
        any::<i64>(),
        "[a-z\n ]{0,20}",
        -1i64..2_000_000_000,
    )
}

fn render(rows: &[(String, i64, String, i64)]) -> String {
    let mut out = String::from("title\tid\tcontent\tdue\n");
    for (title, id, content, due) in rows {
        out.push_str(&format!("{title}\t{id}\t{}\t{due}\n", escape_content(content)));
    }
    out
}

proptest! {
    #[test]
    fn prop_positions_are_dense(rows in prop::collection::vec(arb_row(), 0..40)) {
        let cards = parse_cards(&render(&rows)).unwrap();
        prop_assert_eq!(cards.len(), rows.len());
        for (index, (card, row)) in cards.iter().zip(&rows).enumerate() {
            prop_assert_eq!(card.position, index);
            prop_assert_eq!(card.id, row.1);
            prop_assert_eq!(&card.content, &row.2);
        }
    }

    #[test]
    fn prop_transfer_recovers_identity(
        id in any::<i64>(),
        position in 0usize..10_000,
        title in "[^:]{0,30}",
    ) {
        let card = Card { id, title: title.clone(), content: String::new(), due_date: -1, position };
        let transfer = decode_transfer(&encode_transfer(&card)).unwrap();
        prop_assert_eq!(transfer.id, id);
        prop_assert_eq!(transfer.position, position);
        prop_assert_eq!(transfer.title, title);
    }

    #[test]
    fn prop_refresh_reverses_positions(rows in prop::collection::vec(arb_row(), 0..20), list_id in 0i64..100) {
        let response = render(&rows);
        let store = move |_: &str| -> Result<String, BoardError> { Ok(response.clone()) };
        let mut collection = CardCollection::new(store);
        collection.show_list_cards(list_id).unwrap();

        let positions: Vec<usize> = collection.cards().iter().map(|c| c.position).collect();
        let expected: Vec<usize> = (0..rows.len()).rev().collect();
        prop_assert_eq!(positions, expected);
    }
}

#[test]
fn no_list_ignores_store_response() {
    let store = |_: &str| -> Result<String, BoardError> { panic!("store must not be called") };
    let mut collection = CardCollection::new(store);
    collection.show_list_cards(NO_LIST).unwrap();
    assert!(collection.is_empty());
}
