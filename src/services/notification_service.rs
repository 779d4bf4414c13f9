// src/services/notification_service.rs
//
// Envio de notificações por e-mail, SMS e WhatsApp como chamadas HTTP
// aos provedores. Sem retry: uma tentativa por notificação e o status
// final fica gravado na tabela (SENT ou FAILED).

use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NotificationRepository,
    models::{
        customer::Customer,
        notification::{Notification, NotificationChannel, NotificationStatus},
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Erros de canal não viram resposta HTTP: são gravados na notificação.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("canal {0} não configurado")]
    Disabled(&'static str),

    #[error("erro de rede: {0}")]
    Transport(String),

    #[error("provedor respondeu {status}: {body}")]
    Http { status: u16, body: String },
}

impl From<reqwest::Error> for ChannelError {
    fn from(e: reqwest::Error) -> Self {
        ChannelError::Transport(e.to_string())
    }
}

// Cada canal é ligado pelas suas variáveis de ambiente.
// Canal sem configuração continua existindo, só registra FAILED.
#[derive(Clone)]
pub struct EmailSettings {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

#[derive(Clone)]
pub struct SmsSettings {
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
}

#[derive(Clone)]
pub struct WhatsappSettings {
    pub api_url: String,
    pub access_token: String,
    pub phone_number_id: String,
}

#[derive(Clone)]
pub struct NotificationChannels {
    http: Client,
    email: Option<EmailSettings>,
    sms: Option<SmsSettings>,
    whatsapp: Option<WhatsappSettings>,
}

impl NotificationChannels {
    pub fn from_env() -> anyhow::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let email = match (
            std::env::var("EMAIL_API_URL"),
            std::env::var("EMAIL_API_KEY"),
            std::env::var("EMAIL_FROM_ADDRESS"),
        ) {
            (Ok(api_url), Ok(api_key), Ok(from_address)) => Some(EmailSettings {
                api_url,
                api_key,
                from_address,
            }),
            _ => None,
        };

        let sms = match (std::env::var("SMS_API_URL"), std::env::var("SMS_API_KEY")) {
            (Ok(api_url), Ok(api_key)) => Some(SmsSettings {
                api_url,
                api_key,
                sender: std::env::var("SMS_SENDER").unwrap_or_else(|_| "Salao".to_string()),
            }),
            _ => None,
        };

        let whatsapp = match (
            std::env::var("WHATSAPP_API_URL"),
            std::env::var("WHATSAPP_ACCESS_TOKEN"),
            std::env::var("WHATSAPP_PHONE_NUMBER_ID"),
        ) {
            (Ok(api_url), Ok(access_token), Ok(phone_number_id)) => Some(WhatsappSettings {
                api_url,
                access_token,
                phone_number_id,
            }),
            _ => None,
        };

        Ok(Self {
            http,
            email,
            sms,
            whatsapp,
        })
    }

    async fn send(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<(), ChannelError> {
        match channel {
            NotificationChannel::Email => self.send_email(recipient, subject, body).await,
            NotificationChannel::Sms => self.send_sms(recipient, body).await,
            NotificationChannel::Whatsapp => self.send_whatsapp(recipient, body).await,
        }
    }

    async fn send_email(
        &self,
        to: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<(), ChannelError> {
        let settings = self
            .email
            .as_ref()
            .ok_or(ChannelError::Disabled("e-mail"))?;

        let response = self
            .http
            .post(&settings.api_url)
            .bearer_auth(&settings.api_key)
            .json(&json!({
                "from": settings.from_address,
                "to": to,
                "subject": subject.unwrap_or("Notificação do salão"),
                "text": body,
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        let settings = self.sms.as_ref().ok_or(ChannelError::Disabled("SMS"))?;

        let response = self
            .http
            .post(&settings.api_url)
            .bearer_auth(&settings.api_key)
            .json(&json!({
                "from": settings.sender,
                "to": to,
                "message": body,
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    // WhatsApp Business API: POST {base}/{phone_number_id}/messages
    async fn send_whatsapp(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        let settings = self
            .whatsapp
            .as_ref()
            .ok_or(ChannelError::Disabled("WhatsApp"))?;

        let url = format!(
            "{}/{}/messages",
            settings.api_url.trim_end_matches('/'),
            settings.phone_number_id
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&settings.access_token)
            .json(&json!({
                "messaging_product": "whatsapp",
                "to": to,
                "type": "text",
                "text": { "body": body },
            }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ChannelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ChannelError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

// Mensagem de confirmação enviada ao cliente após a venda.
pub fn render_sale_confirmation(
    customer_name: &str,
    service_names: &[String],
    total: Decimal,
) -> String {
    format!(
        "Olá, {}! Obrigado pela visita. Serviços: {}. Total: R$ {:.2}. Até a próxima!",
        customer_name,
        service_names.join(", "),
        total
    )
}

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    channels: NotificationChannels,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository, channels: NotificationChannels) -> Self {
        Self { repo, channels }
    }

    pub async fn list(
        &self,
        status: Option<NotificationStatus>,
    ) -> Result<Vec<Notification>, AppError> {
        self.repo.list(status).await
    }

    // Envia para um cliente por um canal, gravando a tentativa.
    // Falha de canal NÃO vira erro da operação: fica no registro.
    pub async fn send_to_customer(
        &self,
        customer: &Customer,
        sale_id: Option<Uuid>,
        channel: NotificationChannel,
        subject: Option<&str>,
        body: &str,
    ) -> Result<Notification, AppError> {
        // E-mail usa o endereço; SMS e WhatsApp usam o telefone.
        let recipient = match channel {
            NotificationChannel::Email => customer.email.clone().ok_or_else(|| {
                AppError::BusinessRule("Cliente não possui e-mail cadastrado.".into())
            })?,
            NotificationChannel::Sms | NotificationChannel::Whatsapp => customer.phone.clone(),
        };

        let notification = self
            .repo
            .create_pending(
                Some(customer.id),
                sale_id,
                channel,
                &recipient,
                subject,
                body,
            )
            .await?;

        match self.channels.send(channel, &recipient, subject, body).await {
            Ok(()) => {
                self.repo.mark_sent(notification.id).await?;
                tracing::info!("📨 Notificação {:?} enviada para {}", channel, recipient);
            }
            Err(e) => {
                self.repo.mark_failed(notification.id, &e.to_string()).await?;
                tracing::warn!("📪 Falha no canal {:?}: {}", channel, e);
            }
        }

        // Relê para devolver o status final gravado.
        let refreshed = self
            .repo
            .find_by_id(notification.id)
            .await?
            .unwrap_or(notification);

        Ok(refreshed)
    }

    // Efeito colateral da venda: confirma por todos os canais que o
    // cliente alcança. Chamado via tokio::spawn, nunca derruba a venda.
    pub async fn dispatch_sale_confirmation(
        &self,
        customer: &Customer,
        sale_id: Uuid,
        service_names: &[String],
        total: Decimal,
    ) {
        let body = render_sale_confirmation(&customer.full_name, service_names, total);
        let subject = "Confirmação de atendimento";

        let mut channels = vec![NotificationChannel::Whatsapp, NotificationChannel::Sms];
        if customer.email.is_some() {
            channels.push(NotificationChannel::Email);
        }

        for channel in channels {
            if let Err(e) = self
                .send_to_customer(customer, Some(sale_id), channel, Some(subject), &body)
                .await
            {
                // Erro de banco ao gravar a tentativa: só loga.
                tracing::error!("Falha ao registrar notificação da venda {}: {}", sale_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_message_lists_services_and_total() {
        let services = vec!["Corte".to_string(), "Escova".to_string()];
        let body = render_sale_confirmation("Maria", &services, "135.50".parse().unwrap());

        assert_eq!(
            body,
            "Olá, Maria! Obrigado pela visita. Serviços: Corte, Escova. Total: R$ 135.50. Até a próxima!"
        );
    }

    #[test]
    fn confirmation_message_formats_whole_totals_with_cents() {
        let services = vec!["Manicure".to_string()];
        let body = render_sale_confirmation("Ana", &services, "80".parse().unwrap());

        assert!(body.contains("R$ 80.00"));
    }
}
