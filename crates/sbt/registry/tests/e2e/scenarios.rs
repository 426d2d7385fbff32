//! End-to-end lifecycle scenarios: mint, claim, query, burn, re-mint.

use sbt_registry::{
    Address, AttributeCommitment, ErrorKind, IdentityRegistry, LifecycleState, ReadPolicy,
    RegistryError, UserId,
};

const OPERATOR: Address = Address::from_low_u8(0xa0);
const ADDR1: Address = Address::from_low_u8(0x01);
const ADDR2: Address = Address::from_low_u8(0x02);
const ADDR_X: Address = Address::from_low_u8(0x0a);
const ADDR_Y: Address = Address::from_low_u8(0x0b);

fn hashed_git() -> AttributeCommitment {
    AttributeCommitment::digest(b"my_git")
}

fn hashed_email() -> AttributeCommitment {
    AttributeCommitment::digest(b"my_email")
}

fn registry() -> IdentityRegistry {
    super::init_tracing();
    IdentityRegistry::new(OPERATOR)
}

#[test]
fn mint_and_claim_binds_commitments() {
    let sbt = registry();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();

    assert!(sbt.has_identity(&ADDR1));
    let view = sbt.get_identity(&ADDR1, &ADDR1).unwrap();
    assert_eq!(view.identifier, UserId(123));
    assert_eq!(view.commitments, vec![hashed_git(), hashed_email()]);
}

#[test]
fn claim_without_mint_is_rejected() {
    let sbt = registry();
    let err = sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap_err();
    assert_eq!(err.to_string(), "no minted identity for caller");
    assert!(!sbt.has_identity(&ADDR1));
}

#[test]
fn other_address_cannot_claim_and_claim_is_single_use() {
    let sbt = registry();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();

    assert_eq!(
        sbt.claim(&ADDR2, vec![hashed_git()]).unwrap_err(),
        RegistryError::NoMintedIdentity
    );

    let err = sbt
        .claim(&ADDR1, vec![AttributeCommitment::digest(b"other_git")])
        .unwrap_err();
    assert_eq!(err.to_string(), "identity already claimed");
    assert_eq!(err.kind(), ErrorKind::StateConflict);

    // the first commitments survive the rejected re-claim
    let view = sbt.get_identity(&ADDR1, &ADDR1).unwrap();
    assert_eq!(view.commitments, vec![hashed_git(), hashed_email()]);
}

#[test]
fn double_mint_keeps_first_identifier() {
    let sbt = registry();
    sbt.mint(&OPERATOR, ADDR1, UserId(1)).unwrap();

    let err = sbt.mint(&OPERATOR, ADDR1, UserId(2)).unwrap_err();
    assert_eq!(err.to_string(), "already minted, not yet claimed");
    assert_eq!(sbt.get_identity(&ADDR1, &ADDR1).unwrap().identifier, UserId(1));

    sbt.claim(&ADDR1, vec![hashed_git()]).unwrap();
    let err = sbt.mint(&OPERATOR, ADDR1, UserId(3)).unwrap_err();
    assert_eq!(err.to_string(), "identity already bound");
    assert_eq!(sbt.get_identity(&ADDR1, &ADDR1).unwrap().identifier, UserId(1));
}

#[test]
fn non_operator_mint_changes_nothing() {
    let sbt = registry();
    let err = sbt.mint(&ADDR1, ADDR1, UserId(1)).unwrap_err();

    assert_eq!(err.to_string(), "only operator can mint");
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(sbt.identity_count(), 0);
    assert!(sbt.events().is_empty());
}

#[test]
fn burn_clears_identity() {
    let sbt = registry();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();
    sbt.burn(&ADDR1).unwrap();

    assert!(!sbt.has_identity(&ADDR1));
    let err = sbt.get_identity(&ADDR1, &ADDR1).unwrap_err();
    assert_eq!(err.to_string(), "identity does not exist");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn burning_empty_address_is_rejected() {
    let sbt = registry();
    let err = sbt.burn(&ADDR1).unwrap_err();
    assert_eq!(err.to_string(), "identity does not exist");
    assert_eq!(err.kind(), ErrorKind::StateConflict);
}

#[test]
fn burn_then_remint_starts_clean() {
    let sbt = registry();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();
    sbt.burn(&ADDR1).unwrap();

    sbt.mint(&OPERATOR, ADDR1, UserId(456)).unwrap();
    assert_eq!(sbt.lifecycle(&ADDR1), LifecycleState::Minted);

    let view = sbt.get_identity(&ADDR1, &ADDR1).unwrap();
    assert_eq!(view.identifier, UserId(456));
    assert!(view.commitments.is_empty());

    sbt.claim(&ADDR1, vec![hashed_email()]).unwrap();
    assert_eq!(
        sbt.get_identity(&ADDR1, &ADDR1).unwrap().commitments,
        vec![hashed_email()]
    );
}

#[test]
fn burn_only_touches_callers_record() {
    let sbt = registry();
    sbt.mint(&OPERATOR, ADDR1, UserId(1)).unwrap();
    sbt.mint(&OPERATOR, ADDR2, UserId(2)).unwrap();

    sbt.burn(&ADDR2).unwrap();
    assert!(sbt.has_identity(&ADDR1));
    assert!(!sbt.has_identity(&ADDR2));
}

#[test]
fn collaborator_lookup_scenario() {
    let sbt = registry();
    sbt.set_collaborator(&OPERATOR, ADDR_X).unwrap();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();

    assert_eq!(sbt.get_user_identifier(&ADDR_X, &ADDR1).unwrap(), UserId(123));

    let err = sbt.get_user_identifier(&ADDR_Y, &ADDR1).unwrap_err();
    assert_eq!(err.to_string(), "caller is not authorized collaborator");
}

#[test]
fn non_operator_cannot_configure_collaborator() {
    let sbt = registry();
    let err = sbt.set_collaborator(&ADDR_X, ADDR_X).unwrap_err();

    assert_eq!(err.to_string(), "only operator can configure");
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(sbt.collaborator(), None);
}

#[test]
fn collaborator_cannot_read_commitments_by_default() {
    let sbt = registry();
    sbt.set_collaborator(&OPERATOR, ADDR_X).unwrap();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();

    for caller in [ADDR_X, ADDR_Y, OPERATOR] {
        assert_eq!(
            sbt.get_identity(&caller, &ADDR1).unwrap_err(),
            RegistryError::ReadNotPermitted
        );
    }
    // the gate still resolves the identifier
    assert_eq!(sbt.get_user_identifier(&ADDR_X, &ADDR1).unwrap(), UserId(123));
}

#[test]
fn collaborator_policy_discloses_identifier_only() {
    super::init_tracing();
    let sbt = IdentityRegistry::with_read_policy(OPERATOR, ReadPolicy::SelfOrCollaborator);
    sbt.set_collaborator(&OPERATOR, ADDR_X).unwrap();
    sbt.mint(&OPERATOR, ADDR1, UserId(123)).unwrap();
    sbt.claim(&ADDR1, vec![hashed_git(), hashed_email()]).unwrap();

    let view = sbt.get_identity(&ADDR_X, &ADDR1).unwrap();
    assert_eq!(view.identifier, UserId(123));
    assert!(view.commitments.is_empty());

    assert_eq!(
        sbt.get_identity(&ADDR_Y, &ADDR1).unwrap_err(),
        RegistryError::ReadNotPermitted
    );
}
