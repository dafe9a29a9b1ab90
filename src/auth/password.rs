use crate::error::AppError;

/// bcrypt hashing at a fixed cost.
///
/// Hashing is CPU bound, so both operations run on the blocking pool instead
/// of an async worker.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    pub async fn verify(&self, password: String, hashed: String) -> Result<bool, AppError> {
        let matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed)).await??;
        Ok(matches)
    }
}
