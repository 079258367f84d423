use super::constants::*;
use music_catalog::CatalogStore;

/// Three users, plus the "Abbey" album whose artist is created implicitly.
pub fn abbey_catalog() -> CatalogStore {
    let mut store = CatalogStore::new();
    store.create_user("Alice", ALICE_MOBILE);
    store.create_user("Bob", BOB_MOBILE);
    store.create_user("Carol", CAROL_MOBILE);
    store.create_album(ABBEY, BEATLES);
    store
        .create_song(COME_TOGETHER, ABBEY, 300)
        .expect("album exists");
    store.create_song(SOMETHING, ABBEY, 300).expect("album exists");
    store
}
