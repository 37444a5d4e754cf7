use std::ops::DerefMut;
use std::sync::{Arc, Mutex, MutexGuard};
use rand::{Rng, RngCore};
use uuid::{Uuid, Variant, Version};

/// Shared handle to an injected rng. Salting and id generation go
/// through this so tests can pin a seeded [rand::rngs::StdRng].
pub struct SyncRng<R: RngCore + Send> {
    rng: Arc<Mutex<R>>,
}

impl<R: RngCore + Send> SyncRng<R> {
    pub fn new(rng: R) -> Self {
        SyncRng {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn get_rng(&self) -> MutexGuard<'_, R> {
        self.rng.lock().expect("rng mutex poisoned")
    }

    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.get_rng().deref_mut().fill_bytes(dest)
    }
}

impl<R: RngCore + Send> Clone for SyncRng<R> {
    fn clone(&self) -> Self {
        SyncRng {
            rng: self.rng.clone(),
        }
    }
}

pub fn make_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}
