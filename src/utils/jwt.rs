use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Subject (user ID)
    pub role: String, // Role at issue time: user / mitra / admin
    pub exp: usize,   // Expiration time
    pub iat: usize,   // Issued at
}

pub fn create_jwt_token(user_id: &str, role: &str) -> Result<String, JwtError> {
    let secret = constants::config::get_jwt_secret();

    let now = chrono::Utc::now();
    let exp = (now + chrono::Duration::hours(24)).timestamp() as usize; // 24 hours

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn verify_jwt_token(token: &str) -> Result<Claims, JwtError> {
    let secret = constants::config::get_jwt_secret();

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::{create_jwt_token, verify_jwt_token};

    #[test]
    fn token_round_trip() {
        let token = create_jwt_token("8c1b9e7c-0000-4000-8000-000000000001", "mitra").unwrap();
        let claims = verify_jwt_token(&token).unwrap();
        assert_eq!(claims.sub, "8c1b9e7c-0000-4000-8000-000000000001");
        assert_eq!(claims.role, "mitra");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_jwt_token("not-a-token").is_err());
    }
}
