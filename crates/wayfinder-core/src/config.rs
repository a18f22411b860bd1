/// Loads service configuration from the process environment.
///
/// Implementors derive `serde::Deserialize`; field `database_url` maps to the
/// `DATABASE_URL` variable and so on. A `.env` file in the working directory is
/// read first when present, without overriding variables that are already set.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        let _ = dotenvy::dotenv();
        envy::from_env()
    }
}
