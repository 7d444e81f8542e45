//! Framing invariant: chunk boundaries must never change what a stream
//! decodes to. The same byte sequence split at every possible position
//! — including mid-line and byte-by-byte — has to produce the same
//! records as single-chunk delivery.

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use ludonet_transport::TransportError;
use ludonet_wire::{Json, LineStream};
use serde_json::{Value, json};

const BODY: &[u8] =
    b"{\"id\":\"g1\",\"wtime\":1000}\n\n{\"id\":\"g2\",\"wtime\":2000}\n";

fn expected() -> Vec<Value> {
    vec![
        json!({"id": "g1", "wtime": 1000}),
        json!({}),
        json!({"id": "g2", "wtime": 2000}),
    ]
}

async fn decode_chunks(chunks: Vec<Vec<u8>>) -> Vec<Value> {
    let chunks = stream::iter(
        chunks
            .into_iter()
            .map(|c| Ok::<_, TransportError>(Bytes::from(c))),
    );
    LineStream::new(Json, chunks)
        .map(|item| item.expect("every line should decode"))
        .collect()
        .await
}

#[tokio::test]
async fn test_single_chunk_delivery() {
    assert_eq!(decode_chunks(vec![BODY.to_vec()]).await, expected());
}

#[tokio::test]
async fn test_every_split_position_decodes_identically() {
    for split in 0..=BODY.len() {
        let (head, tail) = BODY.split_at(split);
        let records =
            decode_chunks(vec![head.to_vec(), tail.to_vec()]).await;
        assert_eq!(records, expected(), "split at byte {split}");
    }
}

#[tokio::test]
async fn test_byte_by_byte_delivery() {
    let chunks = BODY.iter().map(|b| vec![*b]).collect();
    assert_eq!(decode_chunks(chunks).await, expected());
}

#[tokio::test]
async fn test_spec_example_split_mid_record() {
    let records = decode_chunks(vec![
        b"{\"a\":1".to_vec(),
        b"}\n{\"b\":2}\n".to_vec(),
    ])
    .await;
    assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
}
