//! Browser script: tab switching and the relay consumer
//!
//! The consumer reads the `text/event-stream` body with a stream reader,
//! keeps the trailing partial line between reads, and walks
//! `idle -> streaming -> done | error` per request.

pub const CHAT_SCRIPT: &str = r#"
function openTab(evt, tabName) {
    for (const content of document.getElementsByClassName('tab-content')) {
        content.classList.remove('active');
    }
    for (const tab of document.getElementsByClassName('tab')) {
        tab.classList.remove('active');
    }
    document.getElementById(tabName).classList.add('active');
    evt.currentTarget.classList.add('active');
}

function scrollChat() {
    const chat = document.getElementById('chat-container');
    chat.scrollTop = chat.scrollHeight;
}

function appendMessage(sender, content, className, append = false) {
    const chat = document.getElementById('chat-container');
    const last = chat.lastElementChild;
    if (append && last && last.classList.contains(className)) {
        last.querySelector('.content').textContent += content;
    } else {
        const element = document.createElement('div');
        element.className = className;
        const label = document.createElement('strong');
        label.textContent = sender + ':';
        const body = document.createElement('span');
        body.className = 'content';
        body.textContent = ' ' + content;
        element.append(label, body);
        chat.appendChild(element);
    }
    scrollChat();
}

async function sendMessage(event) {
    event.preventDefault();
    const form = document.getElementById('chat-form');
    const formData = new FormData(form);
    appendMessage('You', formData.get('message'), 'user-message');
    form.reset();

    let state = 'idle';
    let started = false;
    try {
        const response = await fetch('/', { method: 'POST', body: formData });
        if (!response.ok) {
            throw new Error(await response.text());
        }
        const reader = response.body.getReader();
        const decoder = new TextDecoder();
        let buffer = '';
        state = 'streaming';

        while (state === 'streaming') {
            const { done, value } = await reader.read();
            if (done) {
                break;
            }
            buffer += decoder.decode(value, { stream: true });
            const lines = buffer.split('\n');
            buffer = lines.pop();

            for (const line of lines) {
                if (!line.startsWith('data: ')) {
                    continue;
                }
                const payload = line.slice(6);
                if (payload === '[DONE]') {
                    state = 'done';
                    break;
                }
                const data = JSON.parse(payload);
                if (data.error) {
                    appendMessage('Error', data.error, 'error-message');
                    state = 'error';
                    break;
                }
                if (data.content) {
                    appendMessage('Bot', data.content, 'bot-message', started);
                    started = true;
                }
            }
        }
        if (state !== 'done') {
            reader.cancel();
        }
    } catch (error) {
        console.error('Error:', error);
        if (state !== 'error') {
            appendMessage('Error', 'An error occurred while sending the message.', 'error-message');
        }
    }
}

scrollChat();
"#;
