mod common;
use lue_lue_backend::dto::updates::{CardFilter, UpdateCard};
use lue_lue_backend::entity::games::CardType;
use lue_lue_backend::repository::{cards, claims, players};
use lue_lue_backend::rules::MAX_CARDS_PER_CLAIM;
use common::test_bootstrap;
use lue_lue_backend::{ConstraintKind, RepositoryError};
use sea_orm::DatabaseConnection;

async fn deal(
    db: &DatabaseConnection,
    player_id: &str,
    ranks: &[CardType],
) -> anyhow::Result<Vec<String>> {
    let mut ids = Vec::new();
    for rank in ranks {
        ids.push(cards::create_card(db, *rank, Some(player_id)).await?.id);
    }
    Ok(ids)
}

#[tokio::test]
async fn cards_are_listed_by_holder() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let grace = players::create_player(&db, "Grace").await?;

    deal(&db, &ada.id, &[CardType::King, CardType::Joker]).await?;
    deal(&db, &grace.id, &[CardType::Ace]).await?;
    cards::create_card(&db, CardType::Queen, None).await?;

    assert_eq!(cards::list_cards(&db, CardFilter::held_by(ada.id.clone())).await?.len(), 2);
    assert_eq!(cards::list_cards(&db, CardFilter::held_by(grace.id.clone())).await?.len(), 1);
    assert_eq!(cards::list_cards(&db, CardFilter::default()).await?.len(), 4);

    Ok(())
}

#[tokio::test]
async fn card_filter_cannot_combine_holder_and_claim() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;

    let filter = CardFilter {
        player_id: Some("p".to_string()),
        claim_id: Some("c".to_string()),
    };
    let err = cards::list_cards(&db, filter).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidInput(_)));

    Ok(())
}

#[tokio::test]
async fn card_updates_are_partial() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let card = cards::create_card(&db, CardType::Jack, Some(&ada.id)).await?;

    let update = UpdateCard {
        card_type: Some(CardType::Ace),
        ..UpdateCard::new(card.id.clone())
    };
    let card = cards::update_card(&db, update).await?;
    assert_eq!(card.card_type, Some(CardType::Ace));
    assert_eq!(card.player_id.as_deref(), Some(ada.id.as_str()));

    let update = UpdateCard {
        player_id: Some(None),
        ..UpdateCard::new(card.id.clone())
    };
    let card = cards::update_card(&db, update).await?;
    assert_eq!(card.player_id, None);
    assert_eq!(card.card_type, Some(CardType::Ace));

    let err = cards::update_card(&db, UpdateCard::new(card.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidInput(_)));

    let update = UpdateCard {
        player_id: Some(Some("ghost".to_string())),
        ..UpdateCard::new(card.id.clone())
    };
    let err = cards::update_card(&db, update).await.unwrap_err();
    assert_eq!(err.constraint(), Some(ConstraintKind::ForeignKey));

    cards::delete_card(&db, &card.id).await?;
    assert!(cards::find_card(&db, &card.id).await.unwrap_err().is_not_found());

    Ok(())
}

#[tokio::test]
async fn claim_takes_the_listed_cards() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let ids = deal(&db, &ada.id, &[CardType::King, CardType::King, CardType::Joker]).await?;

    let created = claims::create_claim(&db, &ada.id, &ids[..2]).await?;
    assert_eq!(created.claim.number_of_cards, Some(2));
    assert_eq!(created.claim.created_by, ada.id);
    assert!(created
        .cards
        .iter()
        .all(|card| card.claim_id.as_deref() == Some(created.claim.id.as_str())));

    let found = claims::find_claim(&db, &created.claim.id).await?;
    assert_eq!(found.claim, created.claim);
    let mut found_ids: Vec<String> = found.cards.iter().map(|c| c.id.clone()).collect();
    found_ids.sort();
    let mut expected: Vec<String> = ids[..2].to_vec();
    expected.sort();
    assert_eq!(found_ids, expected);

    let in_claim = cards::list_cards(&db, CardFilter::in_claim(created.claim.id.clone())).await?;
    assert_eq!(in_claim.len(), 2);

    assert_eq!(claims::list_claims(&db, Some(&ada.id)).await?.len(), 1);
    assert_eq!(claims::list_claims(&db, Some("someone else")).await?.len(), 0);
    assert_eq!(claims::list_claims(&db, None).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn claim_size_is_bounded() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let ids = deal(&db, &ada.id, &[CardType::Queen; MAX_CARDS_PER_CLAIM + 1]).await?;

    let err = claims::create_claim(&db, &ada.id, &[]).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidInput(_)));

    let err = claims::create_claim(&db, &ada.id, &ids).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidInput(_)));

    let duplicated = vec![ids[0].clone(), ids[0].clone()];
    let err = claims::create_claim(&db, &ada.id, &duplicated).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidInput(_)));

    let full = claims::create_claim(&db, &ada.id, &ids[..MAX_CARDS_PER_CLAIM]).await?;
    assert_eq!(full.claim.number_of_cards, Some(MAX_CARDS_PER_CLAIM as i32));

    Ok(())
}

#[tokio::test]
async fn failed_claim_leaves_nothing_behind() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let ids = deal(&db, &ada.id, &[CardType::Ace]).await?;

    let with_unknown = vec![ids[0].clone(), "no-such-card".to_string()];
    let err = claims::create_claim(&db, &ada.id, &with_unknown)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    assert!(claims::list_claims(&db, None).await?.is_empty());
    assert_eq!(cards::find_card(&db, &ids[0]).await?.claim_id, None);

    Ok(())
}

#[tokio::test]
async fn card_cannot_be_claimed_twice() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let ids = deal(&db, &ada.id, &[CardType::Jack, CardType::Jack]).await?;

    claims::create_claim(&db, &ada.id, &ids[..1]).await?;

    let err = claims::create_claim(&db, &ada.id, &ids).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidInput(_)));
    assert_eq!(claims::list_claims(&db, None).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn claim_by_unknown_player_is_rejected() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let card = cards::create_card(&db, CardType::King, None).await?;

    let err = claims::create_claim(&db, "ghost", &[card.id.clone()])
        .await
        .unwrap_err();
    assert_eq!(err.constraint(), Some(ConstraintKind::ForeignKey));

    Ok(())
}

#[tokio::test]
async fn deleting_a_claim_returns_its_cards() -> anyhow::Result<()> {
    let db = test_bootstrap().await?;
    let ada = players::create_player(&db, "Ada").await?;
    let ids = deal(&db, &ada.id, &[CardType::King, CardType::Queen]).await?;
    let created = claims::create_claim(&db, &ada.id, &ids).await?;

    claims::delete_claim(&db, &created.claim.id).await?;

    assert!(claims::find_claim(&db, &created.claim.id)
        .await
        .unwrap_err()
        .is_not_found());
    for id in &ids {
        let card = cards::find_card(&db, id).await?;
        assert_eq!(card.claim_id, None);
        assert_eq!(card.player_id.as_deref(), Some(ada.id.as_str()));
    }

    let err = claims::delete_claim(&db, &created.claim.id).await.unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}
