// src/services/password_policy.rs

/// Regras de senha aplicadas no cadastro de identidades.
/// O padrão exige tamanho mínimo 6, dígito, minúscula, maiúscula e símbolo.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            required_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// Uma mensagem por regra violada; vazio quando a senha é aceita.
    pub fn check(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if password.chars().count() < self.required_length {
            errors.push(format!(
                "A senha deve ter no mínimo {} caracteres.",
                self.required_length
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_alphanumeric()) {
            errors.push("A senha deve ter pelo menos um caractere não alfanumérico.".to_string());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("A senha deve ter pelo menos um dígito ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            errors.push("A senha deve ter pelo menos uma letra minúscula ('a'-'z').".to_string());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            errors.push("A senha deve ter pelo menos uma letra maiúscula ('A'-'Z').".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        assert!(PasswordPolicy::default().check("Senha@123").is_empty());
    }

    #[test]
    fn reports_every_broken_rule() {
        let errors = PasswordPolicy::default().check("abc");
        // tamanho, símbolo, dígito, maiúscula
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn relaxed_policy_only_checks_length() {
        let policy = PasswordPolicy {
            required_length: 6,
            require_digit: false,
            require_lowercase: false,
            require_uppercase: false,
            require_non_alphanumeric: false,
        };
        assert!(policy.check("abcdef").is_empty());
        assert_eq!(policy.check("abc").len(), 1);
    }
}
