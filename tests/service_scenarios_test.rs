//! End-to-end service scenarios over the in-memory Unit of Work.

mod support;

use social_board::domain::{
    ALREADY_FOLLOWING_MESSAGE, NOT_FOLLOWING_MESSAGE, SELF_FOLLOW_MESSAGE, USERNAME_TAKEN_MESSAGE,
};
use social_board::errors::AppError;
use social_board::services::{ServiceContainer, NOT_POST_OWNER_DELETE_MESSAGE, PASSWORD_MISMATCH_MESSAGE};

use support::{services, services_with, sign_up, signup_request, test_config};

// =============================================================================
// Signup and login
// =============================================================================

#[tokio::test]
async fn second_signup_with_same_username_fails() {
    let (services, _) = services();
    let auth = services.auth();

    sign_up(auth.as_ref(), "alice").await;
    let err = auth.signup(signup_request("alice")).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.user_message(), USERNAME_TAKEN_MESSAGE);
}

#[tokio::test]
async fn signup_with_mismatched_passwords_fails() {
    let (services, store) = services();
    let mut request = signup_request("alice");
    request.password_confirm = "different".to_string();

    let err = services.auth().signup(request).await.unwrap_err();

    assert_eq!(err.user_message(), PASSWORD_MISMATCH_MESSAGE);
    assert!(services
        .profiles()
        .get_user_profile_by_username("alice")
        .await
        .is_err());
    assert_eq!(store.post_count(), 0);
}

#[tokio::test]
async fn signup_opens_a_session_that_verifies() {
    let (services, _) = services();
    let signed_in = services.auth().signup(signup_request("alice")).await.unwrap();

    let claims = services
        .auth()
        .verify_session(&signed_in.session.token)
        .unwrap();

    assert_eq!(claims.sub, signed_in.user.id);
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn unusable_session_lifetime_fails_signup_without_creating_the_account() {
    for hours in [i64::MAX / 1000, -1] {
        let mut config = test_config();
        config.session_ttl_hours = hours;
        let (services, _) = services_with(config);

        let err = services.auth().signup(signup_request("alice")).await.unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(services
            .profiles()
            .get_user_profile_by_username("alice")
            .await
            .is_err());
    }
}

#[tokio::test]
async fn login_checks_the_password() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;

    let signed_in = auth.login("alice", "secret1").await.unwrap();
    assert_eq!(signed_in.user.id, alice.id);

    assert!(matches!(
        auth.login("alice", "wrong-password").await,
        Err(AppError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.login("nobody", "secret1").await,
        Err(AppError::InvalidCredentials)
    ));
}

// =============================================================================
// Follow graph
// =============================================================================

#[tokio::test]
async fn bob_follows_alice() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;

    services.follows().follow(bob.id, alice.id).await.unwrap();

    assert!(services.follows().is_following(bob.id, alice.id).await.unwrap());
    assert!(!services.follows().is_following(alice.id, bob.id).await.unwrap());

    let followers = services.follows().get_follower_users(alice.id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, bob.id);

    let following = services.follows().get_following_users(bob.id).await.unwrap();
    assert_eq!(following[0].id, alice.id);

    assert_eq!(services.profiles().get_follower_count(alice.id).await.unwrap(), 1);
    assert_eq!(services.profiles().get_following_count(bob.id).await.unwrap(), 1);
}

#[tokio::test]
async fn follow_rules_are_enforced() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;
    let follows = services.follows();

    let err = follows.follow(alice.id, alice.id).await.unwrap_err();
    assert_eq!(err.user_message(), SELF_FOLLOW_MESSAGE);

    follows.follow(bob.id, alice.id).await.unwrap();
    let err = follows.follow(bob.id, alice.id).await.unwrap_err();
    assert_eq!(err.user_message(), ALREADY_FOLLOWING_MESSAGE);

    follows.unfollow(bob.id, alice.id).await.unwrap();
    assert!(!follows.is_following(bob.id, alice.id).await.unwrap());

    let err = follows.unfollow(bob.id, alice.id).await.unwrap_err();
    assert_eq!(err.user_message(), NOT_FOLLOWING_MESSAGE);
}

#[tokio::test]
async fn follower_list_skips_removed_users() {
    let (services, store) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;
    let carol = sign_up(auth.as_ref(), "carol").await;

    services.follows().follow(bob.id, alice.id).await.unwrap();
    services.follows().follow(carol.id, alice.id).await.unwrap();
    store.forget_user(carol.id);

    let followers = services.follows().get_follower_users(alice.id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "bob");
}

// =============================================================================
// Posts and timeline
// =============================================================================

#[tokio::test]
async fn only_the_author_deletes_a_post() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;
    let posts = services.posts();

    let post = posts.create_post(alice.id, "hello").await.unwrap();

    let err = posts.delete_post(post.id, bob.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotOwner(_)));
    assert_eq!(err.user_message(), NOT_POST_OWNER_DELETE_MESSAGE);

    posts.delete_post(post.id, alice.id).await.unwrap();
    assert!(matches!(
        posts.get_post(post.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn content_length_boundaries() {
    let (services, _) = services();
    let alice = sign_up(services.auth().as_ref(), "alice").await;
    let posts = services.posts();

    assert!(posts.create_post(alice.id, "").await.is_err());
    assert!(posts.create_post(alice.id, "   ").await.is_err());
    assert!(posts.create_post(alice.id, &"a".repeat(400)).await.is_ok());
    assert!(posts.create_post(alice.id, &"a".repeat(401)).await.is_err());
    assert!(posts.create_post(alice.id, &"あ".repeat(400)).await.is_ok());
}

#[tokio::test]
async fn author_edit_rewrites_content() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;
    let posts = services.posts();

    let post = posts.create_post(alice.id, "first draft").await.unwrap();

    assert!(matches!(
        posts.update_post(post.id, "hijacked", bob.id).await,
        Err(AppError::NotOwner(_))
    ));
    assert!(posts.update_post(post.id, &"x".repeat(401), alice.id).await.is_err());

    let updated = posts.update_post(post.id, "final", alice.id).await.unwrap();
    assert_eq!(updated.content.as_str(), "final");
    assert!(updated.updated_at >= post.updated_at);
    assert_eq!(posts.get_post(post.id).await.unwrap().content.as_str(), "final");
}

#[tokio::test]
async fn default_timeline_shows_everyone_newest_first() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;
    let posts = services.posts();

    posts.create_post(alice.id, "from alice").await.unwrap();
    posts.create_post(bob.id, "from bob").await.unwrap();

    // bob follows nobody and still sees alice
    let timeline = posts.get_timeline(bob.id).await.unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].post.content.as_str(), "from bob");
    assert_eq!(timeline[1].author.username, "alice");
}

#[tokio::test]
async fn following_only_timeline_shows_followed_and_self() {
    let mut config = test_config();
    config.timeline_following_only = true;
    let (services, _) = services_with(config);
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;
    let carol = sign_up(auth.as_ref(), "carol").await;
    let posts = services.posts();

    posts.create_post(alice.id, "from alice").await.unwrap();
    posts.create_post(bob.id, "from bob").await.unwrap();
    posts.create_post(carol.id, "from carol").await.unwrap();
    services.follows().follow(bob.id, alice.id).await.unwrap();

    let authors: Vec<String> = posts
        .get_timeline(bob.id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.author.username)
        .collect();

    assert_eq!(authors.len(), 2);
    assert!(authors.contains(&"alice".to_string()));
    assert!(authors.contains(&"bob".to_string()));
}

#[tokio::test]
async fn timeline_skips_posts_of_removed_authors() {
    let (services, store) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;

    services.posts().create_post(alice.id, "stays").await.unwrap();
    services.posts().create_post(bob.id, "orphaned").await.unwrap();
    store.forget_user(bob.id);

    let timeline = services.posts().get_timeline(alice.id).await.unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].post.content.as_str(), "stays");
}

// =============================================================================
// Profiles and search
// =============================================================================

#[tokio::test]
async fn profile_update_keeps_username() {
    let (services, _) = services();
    let alice = sign_up(services.auth().as_ref(), "alice").await;

    let updated = services
        .profiles()
        .update_profile(alice.id, Some("Alice A.".to_string()), Some("hi".to_string()))
        .await
        .unwrap();

    assert_eq!(updated.username, "alice");
    assert_eq!(updated.display_name.as_str(), "Alice A.");
    assert_eq!(updated.bio.as_deref(), Some("hi"));

    let cleared = services
        .profiles()
        .update_profile(alice.id, None, None)
        .await
        .unwrap();
    assert_eq!(cleared.display_name.as_str(), "Anonymous");
}

#[tokio::test]
async fn search_matches_display_names() {
    let (services, _) = services();
    let auth = services.auth();
    sign_up(auth.as_ref(), "alice").await;
    sign_up(auth.as_ref(), "bob").await;

    let everyone = services.profiles().search_users(None).await.unwrap();
    assert_eq!(everyone.len(), 2);

    let blank = services.profiles().search_users(Some("  ")).await.unwrap();
    assert_eq!(blank.len(), 2);

    let found = services.profiles().search_users(Some("ali")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "alice");

    let wildcard = services.profiles().search_users(Some("%")).await.unwrap();
    assert!(wildcard.is_empty());
}

#[tokio::test]
async fn user_posts_belong_to_one_author() {
    let (services, _) = services();
    let auth = services.auth();
    let alice = sign_up(auth.as_ref(), "alice").await;
    let bob = sign_up(auth.as_ref(), "bob").await;

    services.posts().create_post(alice.id, "one").await.unwrap();
    services.posts().create_post(bob.id, "two").await.unwrap();
    services.posts().create_post(alice.id, "three").await.unwrap();

    let posts = services.profiles().get_user_posts(alice.id).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|post| post.author_id == alice.id));
}
