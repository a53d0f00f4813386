//! API key resolution and storage.
//!
//! Precedence: process env → `.env.local` / `.env` → OS keychain. A key
//! found in the keychain is exported into the env so the transport can
//! read it from one place.

const KEYRING_SERVICE: &str = "mintmark";
const KEYRING_USER: &str = "gemini";
const ENV_KEY: &str = "GEMINI_API_KEY";

/// Load `.env.local` (preferred) or `.env` from the working directory.
/// Missing files are fine; a malformed file is only worth a warning.
pub fn load_dotenv() {
    for env_file in [".env.local", ".env"] {
        let path = std::path::Path::new(env_file);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => log::info!("[CONFIG] Loaded {}", path.display()),
                Err(e) => log::warn!("[CONFIG] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
}

/// Make sure `GEMINI_API_KEY` is set, pulling from the OS keychain when
/// the environment has nothing. Returns whether a key is available.
pub fn ensure_api_key() -> bool {
    if std::env::var(ENV_KEY).map(|k| !k.is_empty()).unwrap_or(false) {
        return true;
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        if let Ok(key) = entry.get_password() {
            if !key.is_empty() {
                std::env::set_var(ENV_KEY, &key);
                log::info!("[CONFIG] Loaded Gemini key from OS keychain");
                return true;
            }
        }
    }

    false
}

/// Save an API key to the OS keychain and export it into the current
/// environment so this session picks it up immediately.
pub fn save_api_key(api_key: &str) -> Result<(), String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
        .map_err(|e| format!("Keyring error: {}", e))?;
    entry
        .set_password(api_key)
        .map_err(|e| format!("Failed to save key: {}", e))?;

    std::env::set_var(ENV_KEY, api_key);
    log::info!("[CONFIG] Gemini API key saved to OS keychain");
    Ok(())
}
