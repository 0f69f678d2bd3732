pub const PAGE_STYLES: &str = r#"
body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; background-color: #f0f0f0; }
.container { background-color: white; padding: 20px; border-radius: 10px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
h1 { color: #333; text-align: center; }
#chat-container { border: 1px solid #ccc; height: 400px; overflow-y: scroll; padding: 10px; margin-bottom: 20px; background-color: #fff; }
#user-input { width: 70%; padding: 10px; border: 1px solid #ccc; border-radius: 5px; }
#send-button { width: 25%; padding: 10px; background-color: #4CAF50; color: white; border: none; border-radius: 5px; cursor: pointer; }
#model-select { width: 100%; padding: 10px; margin-bottom: 10px; border: 1px solid #ccc; border-radius: 5px; }
.image-analysis { margin-top: 20px; border: 1px solid #ccc; padding: 10px; background-color: #fff; white-space: pre-wrap; }
.tabs { display: flex; justify-content: center; margin-bottom: 20px; }
.tab { padding: 10px 20px; cursor: pointer; background-color: #ddd; border: none; border-radius: 5px 5px 0 0; }
.tab.active { background-color: white; }
.tab-content { display: none; }
.tab-content.active { display: block; }
.user-message { background-color: #e6f3ff; padding: 5px 10px; border-radius: 10px; margin: 5px 0; }
.bot-message { background-color: #f0f0f0; padding: 5px 10px; border-radius: 10px; margin: 5px 0; white-space: pre-wrap; }
.error-message { background-color: #fdecea; color: #8a1f11; padding: 5px 10px; border-radius: 10px; margin: 5px 0; }
"#;
