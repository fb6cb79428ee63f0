pub(crate) mod whatsapp;
